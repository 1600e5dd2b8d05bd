use std::borrow::Cow;

use super::pixel::{CHANNELS, ImageBuffer};

/// Canvas size that fits both images.
pub fn target_dimensions(one: &ImageBuffer, two: &ImageBuffer) -> (u32, u32) {
    (
        one.width().max(two.width()),
        one.height().max(two.height()),
    )
}

/// Place `src` at the origin of a transparent-black `width x height` canvas.
///
/// Returns `src` unchanged when it already covers the target in both
/// dimensions. Never shrinks: a larger source is returned as-is.
pub fn pad_to(src: &ImageBuffer, width: u32, height: u32) -> Cow<'_, ImageBuffer> {
    if src.width() >= width && src.height() >= height {
        return Cow::Borrowed(src);
    }

    let mut canvas = ImageBuffer::transparent(width.max(src.width()), height.max(src.height()));
    let row_bytes = src.width() as usize * CHANNELS;
    let data = src.as_raw();

    for y in 0..src.height() {
        let start = y as usize * row_bytes;
        // A short source buffer contributes whatever is left of its last row.
        let row = match data.get(start..start + row_bytes) {
            Some(row) => row,
            None => data.get(start..).unwrap_or_default(),
        };
        if let Some(offset) = canvas.offset(0, i64::from(y)) {
            canvas.as_raw_mut()[offset..offset + row.len()].copy_from_slice(row);
        }
        if row.len() < row_bytes {
            break;
        }
    }

    Cow::Owned(canvas)
}
