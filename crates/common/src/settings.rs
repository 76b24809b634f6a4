use crate::error::SettingsError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level settings container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub projection: ProjectionSettings,
    pub scene: SceneSettings,
    pub assets: AssetSettings,
    pub keybindings: KeyBindingSettings,
}

impl Settings {
    /// Load settings from a TOML file. Missing fields use defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write settings to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "flycube".into(),
            width: 800,
            height: 600,
        }
    }
}

/// Initial camera placement and tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub world_up: Vec3,
    /// Degrees. -90 faces down the -Z axis.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    /// World units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of cursor travel.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
        }
    }
}

/// Perspective projection parameters. The field of view comes from the camera zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    /// Replace `aspect_ratio` with the window's aspect on every resize.
    pub match_window_aspect: bool,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 10.0,
            near: 0.1,
            far: 100.0,
            match_window_aspect: false,
        }
    }
}

/// Scene layout and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub clear_color: [f32; 3],
    pub light_position: Vec3,
    pub light_scale: f32,
    pub light_color: [f32; 3],
    pub object_color: [f32; 3],
    /// Base angular speed of the textured cubes in degrees per second,
    /// multiplied by each instance's index.
    pub spin_speed: f32,
    pub spin_axis: Vec3,
    /// Blend weight of the secondary texture over the primary one.
    pub secondary_texture_mix: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.1, 0.1],
            light_position: Vec3::new(1.2, 1.0, 2.0),
            light_scale: 0.2,
            light_color: [1.0, 1.0, 1.0],
            object_color: [1.0, 0.5, 0.31],
            spin_speed: 50.0,
            spin_axis: Vec3::new(0.5, 1.0, 0.0),
            secondary_texture_mix: 0.0,
        }
    }
}

/// Texture and shader locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    pub primary_texture: PathBuf,
    pub secondary_texture: PathBuf,
    /// Directory holding `lit.wgsl`, `light.wgsl` and `textured.wgsl` overrides.
    pub shader_dir: Option<PathBuf>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            primary_texture: PathBuf::from("textures/cat.jpg"),
            secondary_texture: PathBuf::from("textures/container.jpg"),
            shader_dir: None,
        }
    }
}

/// Key names follow winit's `KeyCode` debug names (`"KeyW"`, `"Escape"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingSettings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub quit: String,
    pub toggle_overlay: String,
}

impl Default for KeyBindingSettings {
    fn default() -> Self {
        Self {
            forward: "KeyW".into(),
            backward: "KeyS".into(),
            left: "KeyA".into(),
            right: "KeyD".into(),
            quit: "Escape".into(),
            toggle_overlay: "F1".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let s = Settings::default();
        assert_eq!(s.camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(s.camera.yaw, -90.0);
        assert_eq!(s.camera.zoom, 45.0);
        assert_eq!(s.projection.near, 0.1);
        assert_eq!(s.projection.far, 100.0);
        assert!((s.projection.aspect_ratio - 1.6).abs() < 1e-6);
        assert_eq!(s.keybindings.forward, "KeyW");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = Settings::from_toml(
            r#"
            [camera]
            movement_speed = 5.0

            [projection]
            far = 250.0
            "#,
        )
        .unwrap();
        assert_eq!(s.camera.movement_speed, 5.0);
        assert_eq!(s.camera.mouse_sensitivity, 0.1);
        assert_eq!(s.projection.far, 250.0);
        assert_eq!(s.projection.near, 0.1);
        assert_eq!(s.window, WindowSettings::default());
    }

    #[test]
    fn toml_round_trip() {
        let mut s = Settings::default();
        s.camera.position = Vec3::new(1.0, 2.0, 3.0);
        s.assets.shader_dir = Some(PathBuf::from("shaders"));
        let text = s.to_toml().unwrap();
        let back = Settings::from_toml(&text).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flycube.toml");
        let mut s = Settings::default();
        s.window.title = "test".into();
        s.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.window.title, "test");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[camera]\nyaw = \"left\"\n").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
