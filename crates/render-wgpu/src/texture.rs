use std::path::Path;

/// Errors from preparing textures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("texture is empty ({width}x{height})")]
    EmptyTexture { width: u32, height: u32 },
    #[error("texture {width}x{height} exceeds device limit {max}")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decode an image file (any format the `image` crate supports).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let img = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyTexture { width, height });
        }
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    /// Load `path` if set, falling back to `fallback` when unset or unusable.
    pub fn load_or_else(
        path: Option<&Path>,
        max_dimension: u32,
        fallback: impl FnOnce() -> Self,
    ) -> Self {
        let Some(path) = path else {
            return fallback();
        };
        match Self::load(path).and_then(|t| t.check_fits(max_dimension).map(|()| t)) {
            Ok(texture) => {
                tracing::info!(
                    path = %path.display(),
                    width = texture.width,
                    height = texture.height,
                    "loaded texture"
                );
                texture
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to load texture, using fallback: {e}");
                fallback()
            }
        }
    }

    pub fn check_fits(&self, max_dimension: u32) -> Result<(), RenderError> {
        if self.width > max_dimension || self.height > max_dimension {
            return Err(RenderError::TooLarge {
                width: self.width,
                height: self.height,
                max: max_dimension,
            });
        }
        Ok(())
    }

    /// Wooden crate face with a steel frame.
    pub fn crate_diffuse(size: u32) -> Self {
        Self::generate(size, |x, y, frame| {
            if frame {
                return [112, 114, 122, 255];
            }
            let plank = (x * 4 / size) % 2;
            let grain = ((y * 7 + x * 3) % 11) as u8 * 3;
            let base: [u8; 3] = if plank == 0 { [140, 90, 44] } else { [124, 78, 38] };
            [base[0] - grain, base[1] - grain / 2, base[2], 255]
        })
    }

    /// Specular map matching [`TextureData::crate_diffuse`]: shiny frame,
    /// matte wood.
    pub fn crate_specular(size: u32) -> Self {
        Self::generate(size, |_, _, frame| {
            if frame {
                [200, 200, 200, 255]
            } else {
                [12, 12, 12, 255]
            }
        })
    }

    fn generate(size: u32, pixel: impl Fn(u32, u32, bool) -> [u8; 4]) -> Self {
        let size = size.max(1);
        let border = (size / 10).max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let frame = x < border || y < border || x >= size - border || y >= size - border;
                rgba.extend_from_slice(&pixel(x, y, frame));
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_textures_have_expected_size() {
        let diffuse = TextureData::crate_diffuse(64);
        assert_eq!((diffuse.width, diffuse.height), (64, 64));
        assert_eq!(diffuse.rgba.len(), 64 * 64 * 4);

        let specular = TextureData::crate_specular(32);
        assert_eq!(specular.rgba.len(), 32 * 32 * 4);
    }

    #[test]
    fn specular_frame_is_bright() {
        let tex = TextureData::crate_specular(64);
        let px = |x: usize, y: usize| tex.rgba[(y * 64 + x) * 4];
        assert_eq!(px(0, 0), 200);
        assert_eq!(px(32, 32), 12);
    }

    #[test]
    fn diffuse_is_opaque() {
        let tex = TextureData::crate_diffuse(16);
        assert!(tex.rgba.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = TextureData::load("does/not/exist.png").unwrap_err();
        assert!(matches!(err, RenderError::Image(_)));
    }

    #[test]
    fn missing_file_falls_back() {
        let tex = TextureData::load_or_else(Some(Path::new("does/not/exist.png")), 8192, || {
            TextureData::crate_specular(8)
        });
        assert_eq!(tex, TextureData::crate_specular(8));
    }

    #[test]
    fn oversized_texture_rejected() {
        let tex = TextureData::crate_diffuse(64);
        assert!(tex.check_fits(64).is_ok());
        assert!(matches!(
            tex.check_fits(32),
            Err(RenderError::TooLarge { max: 32, .. })
        ));
    }
}
