use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Uniform block shared by every pipeline, mirrored by `FrameUniforms` in `gpu.rs`.
const FRAME_UNIFORMS: &str = r#"
struct FrameUniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_position: vec4<f32>,
    light_color: vec4<f32>,
    object_color: vec4<f32>,
    // x: secondary texture mix
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: FrameUniforms;

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
};

fn instance_model(instance: InstanceInput) -> mat4x4<f32> {
    return mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
}
"#;

/// Ambient + diffuse lighting of a solid-colored object.
const LIT_BODY: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = instance_model(instance);
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.projection * globals.view * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let ambient = 0.1 * globals.light_color.rgb;
    let normal = normalize(in.world_normal);
    let light_dir = normalize(globals.light_position.xyz - in.world_position);
    let diffuse = max(dot(normal, light_dir), 0.0) * globals.light_color.rgb;
    return vec4<f32>((ambient + diffuse) * globals.object_color.rgb, 1.0);
}
"#;

/// Flat light color for the light-source marker.
const LIGHT_BODY: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> @builtin(position) vec4<f32> {
    let model = instance_model(instance);
    return globals.projection * globals.view * model * vec4<f32>(vertex.position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(globals.light_color.rgb, 1.0);
}
"#;

/// Primary texture blended with the secondary one, tinted by the light color.
const TEXTURED_BODY: &str = r#"
@group(1) @binding(0)
var primary_texture: texture_2d<f32>;
@group(1) @binding(1)
var secondary_texture: texture_2d<f32>;
@group(1) @binding(2)
var texture_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = instance_model(instance);
    var out: VertexOutput;
    out.clip_position = globals.projection * globals.view * model * vec4<f32>(vertex.position, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let primary = textureSample(primary_texture, texture_sampler, in.uv);
    let secondary = textureSample(secondary_texture, texture_sampler, in.uv);
    let color = mix(primary, secondary, globals.params.x);
    return vec4<f32>(color.rgb * globals.light_color.rgb, color.a);
}
"#;

pub const LIT_FILE: &str = "lit.wgsl";
pub const LIGHT_FILE: &str = "light.wgsl";
pub const TEXTURED_FILE: &str = "textured.wgsl";

/// Errors from loading or validating shader overrides.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader {label} failed validation: {message}")]
    Validation { label: String, message: String },
}

/// WGSL source for the three pipelines. Overrides are complete shaders,
/// including the uniform and instance declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSources {
    pub lit: Cow<'static, str>,
    pub light: Cow<'static, str>,
    pub textured: Cow<'static, str>,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ShaderSources {
    pub fn builtin() -> Self {
        Self {
            lit: Cow::Owned(format!("{FRAME_UNIFORMS}{LIT_BODY}")),
            light: Cow::Owned(format!("{FRAME_UNIFORMS}{LIGHT_BODY}")),
            textured: Cow::Owned(format!("{FRAME_UNIFORMS}{TEXTURED_BODY}")),
        }
    }

    /// Built-in sources with any files found in `dir` substituted in.
    pub fn load(dir: Option<&Path>) -> Self {
        let mut sources = Self::builtin();
        let Some(dir) = dir else {
            return sources;
        };

        for (file, slot) in [
            (LIT_FILE, &mut sources.lit),
            (LIGHT_FILE, &mut sources.light),
            (TEXTURED_FILE, &mut sources.textured),
        ] {
            let path = dir.join(file);
            match read_override(&path) {
                Ok(text) => {
                    tracing::info!("using shader override {}", path.display());
                    *slot = Cow::Owned(text);
                }
                Err(e) => tracing::warn!("{e}; using built-in shader"),
            }
        }
        sources
    }
}

fn read_override(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Run `build` inside a validation error scope. Anything created in it that
/// fails validation (shader module or pipeline) surfaces here instead of at
/// the device's uncaptured-error handler.
pub(crate) fn validated<T>(
    device: &wgpu::Device,
    label: &str,
    build: impl FnOnce() -> T,
) -> Result<T, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = build();
    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(value),
        Some(error) => Err(ShaderError::Validation {
            label: label.to_string(),
            message: error.to_string(),
        }),
    }
}

pub(crate) fn shader_module(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}
