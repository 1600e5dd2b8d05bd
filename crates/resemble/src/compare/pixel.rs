use image::RgbaImage;

/// Bytes per pixel in every buffer the engine touches (RGBA8, interleaved).
pub const CHANNELS: usize = 4;

/// A single RGBA sample. Brightness and hue are derived on demand and never
/// written back to the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Perceptually weighted lightness, unrounded.
    pub fn brightness(&self) -> f64 {
        0.3 * f64::from(self.r) + 0.59 * f64::from(self.g) + 0.11 * f64::from(self.b)
    }

    /// HSV hue in `[0, 1)`. Achromatic pixels (max == min) have hue 0.
    pub fn hue(&self) -> f64 {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        if max == min {
            return 0.0;
        }

        let d = max - min;
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h / 6.0
    }
}

/// A rectangular RGBA8 pixel grid, `width * height * 4` bytes, row-major.
///
/// The engine only ever reads input buffers. A buffer whose `data` is shorter
/// than its declared shape is tolerated: the missing pixels read as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Wrap an already-shaped RGBA8 buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// A zero-initialized (transparent black) buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// A buffer filled with a single color.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let mut buf = Self::transparent(width, height);
        for chunk in buf.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
        }
        buf
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of `(x, y)`, or `None` outside the declared shape.
    ///
    /// Coordinates are signed so neighborhood scans can ask for `x - 1` at
    /// the left edge without wrapping onto the previous row.
    pub fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Read the pixel starting at a byte offset; `None` past the end of data.
    pub fn pixel_at_offset(&self, offset: usize) -> Option<Pixel> {
        let end = offset.checked_add(CHANNELS)?;
        let px = self.data.get(offset..end)?;
        Some(Pixel::new(px[0], px[1], px[2], px[3]))
    }

    /// Read the pixel at `(x, y)`; `None` outside the image.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Pixel> {
        self.offset(x, y).and_then(|o| self.pixel_at_offset(o))
    }

    /// Write a pixel; writes outside the buffer are dropped.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        if let Some(offset) = self.offset(i64::from(x), i64::from(y))
            && let Some(px) = self.data.get_mut(offset..offset + CHANNELS)
        {
            px.copy_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
        }
    }
}

impl From<RgbaImage> for ImageBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }
}
