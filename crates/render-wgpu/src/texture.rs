use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Errors from reading and decoding texture images.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode texture {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture {path} is {width}x{height}, larger than the device limit of {max}")]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max: u32,
    },
}

const FALLBACK_SIZE: u32 = 8;

/// Read and decode an image file into RGBA8.
pub fn decode_texture(path: impl AsRef<Path>) -> Result<RgbaImage, TextureError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| TextureError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Magenta/black checkerboard shown in place of a texture that failed to load.
pub fn fallback_texture() -> RgbaImage {
    RgbaImage::from_fn(FALLBACK_SIZE, FALLBACK_SIZE, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 0, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

/// Decode `path`, rejecting images with a side longer than `max_dimension`.
pub fn decode_texture_within(
    path: impl AsRef<Path>,
    max_dimension: u32,
) -> Result<RgbaImage, TextureError> {
    let path = path.as_ref();
    let image = decode_texture(path)?;
    let (width, height) = image.dimensions();
    if width > max_dimension || height > max_dimension {
        return Err(TextureError::TooLarge {
            path: path.to_path_buf(),
            width,
            height,
            max: max_dimension,
        });
    }
    Ok(image)
}

/// `max_dimension` is usually `device.limits().max_texture_dimension_2d`.
pub fn load_or_fallback(path: impl AsRef<Path>, max_dimension: u32) -> RgbaImage {
    let path = path.as_ref();
    match decode_texture_within(path, max_dimension) {
        Ok(image) => {
            tracing::info!(
                "loaded texture {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            image
        }
        Err(e) => {
            tracing::error!("{e}; using fallback texture");
            fallback_texture()
        }
    }
}

/// A sampled 2D texture resident on the GPU.
pub(crate) struct GpuTexture {
    // Held so the view's backing texture outlives the bind group.
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.png");
        let source = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        source.save(&path).unwrap();

        let decoded = decode_texture(&path).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_texture(dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();
        let err = decode_texture(&path).unwrap_err();
        assert!(matches!(err, TextureError::Image { .. }));
    }

    #[test]
    fn fallback_is_checkerboard() {
        let tex = fallback_texture();
        assert_eq!(tex.dimensions(), (FALLBACK_SIZE, FALLBACK_SIZE));
        assert_ne!(tex.get_pixel(0, 0), tex.get_pixel(1, 0));
        assert_eq!(tex.get_pixel(0, 0), tex.get_pixel(1, 1));
    }

    #[test]
    fn load_or_fallback_never_fails() {
        let tex = load_or_fallback("definitely/not/here.png", 8192);
        assert_eq!(tex, fallback_texture());
    }

    #[test]
    fn oversized_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(5, 2, Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let err = decode_texture_within(&path, 4).unwrap_err();
        assert!(matches!(
            err,
            TextureError::TooLarge { width: 5, height: 2, max: 4, .. }
        ));
        assert_eq!(load_or_fallback(&path, 4), fallback_texture());
        assert_eq!(load_or_fallback(&path, 5).dimensions(), (5, 2));
    }
}
