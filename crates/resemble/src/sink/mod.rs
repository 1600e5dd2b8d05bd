//! Turning a diff buffer into something a person can look at.

pub mod label;

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use self::label::with_banner;
use crate::compare::pixel::ImageBuffer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("diff buffer does not match its dimensions ({width}x{height}, {len} bytes)")]
    Buffer { width: u32, height: u32, len: usize },

    #[error("PNG encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The painted output of a comparison. Read-only once handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffImage {
    buffer: ImageBuffer,
}

impl DiffImage {
    pub(crate) fn new(buffer: ImageBuffer) -> Self {
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    /// Copy into an `image` buffer, optionally with a captioned banner on top.
    pub fn to_rgba_image(&self, label: Option<&str>) -> Result<RgbaImage, RenderError> {
        let (width, height) = self.buffer.dimensions();
        let img = RgbaImage::from_raw(width, height, self.buffer.as_raw().to_vec()).ok_or(
            RenderError::Buffer {
                width,
                height,
                len: self.buffer.as_raw().len(),
            },
        )?;
        Ok(match label {
            Some(text) if !text.is_empty() => with_banner(&img, text),
            _ => img,
        })
    }

    pub fn to_png(&self, label: Option<&str>) -> Result<Vec<u8>, RenderError> {
        let img = self.to_rgba_image(label)?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// `data:image/png;base64,...`
    pub fn to_data_url(&self, label: Option<&str>) -> Result<String, RenderError> {
        let png = self.to_png(label)?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }

    pub fn save(&self, path: &Path, label: Option<&str>) -> Result<(), RenderError> {
        let png = self.to_png(label)?;
        std::fs::write(path, png).map_err(|source| RenderError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
