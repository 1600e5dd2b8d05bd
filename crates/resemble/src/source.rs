use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::debug;

use crate::compare::pixel::ImageBuffer;
use crate::error::LoadError;

/// Where an input image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Already-decoded RGBA8 pixels; used as-is.
    Buffer(ImageBuffer),
    /// Encoded bytes in any format the `image` crate can decode.
    Bytes(Vec<u8>),
    /// A file on disk, read then decoded.
    Path(PathBuf),
}

impl ImageSource {
    /// Produce the pixel grid. Decoding runs on the blocking pool.
    pub async fn load(self) -> Result<ImageBuffer, LoadError> {
        let what = self.to_string();
        let bytes = match self {
            Self::Buffer(buf) => return Ok(buf),
            Self::Bytes(bytes) => bytes,
            Self::Path(path) => tokio::fs::read(&path)
                .await
                .map_err(|source| LoadError::Io { path, source })?,
        };

        debug!(source = %what, bytes = bytes.len(), "decoding");
        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|_| LoadError::Join {
                what: format!("decode of {what}"),
            })?
            .map_err(|source| LoadError::Decode {
                what: what.clone(),
                source,
            })?;

        let img = decoded.to_rgba8();
        debug!(source = %what, width = img.width(), height = img.height(), "decoded");
        Ok(ImageBuffer::from(img))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer(buf) => write!(f, "<buffer {}x{}>", buf.width(), buf.height()),
            Self::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<ImageBuffer> for ImageSource {
    fn from(buf: ImageBuffer) -> Self {
        Self::Buffer(buf)
    }
}

impl From<RgbaImage> for ImageSource {
    fn from(img: RgbaImage) -> Self {
        Self::Buffer(img.into())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// Load both sources concurrently and wait for both to finish.
///
/// Either failure fails the pair; when both fail, the first source's error
/// is reported.
pub async fn load_pair(
    one: ImageSource,
    two: ImageSource,
) -> Result<(ImageBuffer, ImageBuffer), LoadError> {
    let (one, two) = tokio::join!(one.load(), two.load());
    Ok((one?, two?))
}
