//! Decoded image data.
//!
//! A [Raster] stores one `u32` code per pixel, row-major. What a code means
//! depends on the [Palette]: an index into a color table, or channel bits
//! composed according to a [DirectPalette] layout.

use image::RgbaImage;

use crate::color::Rgb;
use crate::error::{RasterError, RasterResult};

/// Channel bit layout for direct (true color) rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectPalette {
    red_mask: u32,
    green_mask: u32,
    blue_mask: u32,
    red_shift: i32,
    green_shift: i32,
    blue_shift: i32,
}

impl DirectPalette {
    /// Create a layout from channel masks.
    pub fn new(red_mask: u32, green_mask: u32, blue_mask: u32) -> RasterResult<Self> {
        let shift = |mask: u32, channel: &'static str| {
            if mask == 0 {
                return Err(RasterError::EmptyMask { channel });
            }
            // Distance from the mask's top bit to bit 7 of an 8-bit channel.
            Ok(7 - (31 - mask.leading_zeros() as i32))
        };
        Ok(Self {
            red_mask,
            green_mask,
            blue_mask,
            red_shift: shift(red_mask, "red")?,
            green_shift: shift(green_mask, "green")?,
            blue_shift: shift(blue_mask, "blue")?,
        })
    }

    /// 8 bits per channel, `0x00RRGGBB`.
    pub const fn rgb888() -> Self {
        Self {
            red_mask: 0x00FF_0000,
            green_mask: 0x0000_FF00,
            blue_mask: 0x0000_00FF,
            red_shift: -16,
            green_shift: -8,
            blue_shift: 0,
        }
    }

    /// 5-6-5 bits per channel, `RRRRRGGGGGGBBBBB`.
    pub const fn rgb565() -> Self {
        Self {
            red_mask: 0xF800,
            green_mask: 0x07E0,
            blue_mask: 0x001F,
            red_shift: -8,
            green_shift: -3,
            blue_shift: 3,
        }
    }

    /// Red channel mask.
    pub fn red_mask(&self) -> u32 {
        self.red_mask
    }

    /// Green channel mask.
    pub fn green_mask(&self) -> u32 {
        self.green_mask
    }

    /// Blue channel mask.
    pub fn blue_mask(&self) -> u32 {
        self.blue_mask
    }

    /// Decode a pixel code to its color.
    pub fn decode(&self, pixel: u32) -> Rgb {
        Rgb::new(
            unpack(pixel & self.red_mask, self.red_shift),
            unpack(pixel & self.green_mask, self.green_shift),
            unpack(pixel & self.blue_mask, self.blue_shift),
        )
    }

    /// Encode a color, dropping low bits the layout cannot represent.
    pub fn encode(&self, color: Rgb) -> u32 {
        (pack(color.red, self.red_shift) & self.red_mask)
            | (pack(color.green, self.green_shift) & self.green_mask)
            | (pack(color.blue, self.blue_shift) & self.blue_mask)
    }
}

fn unpack(bits: u32, shift: i32) -> u8 {
    let value = if shift < 0 {
        bits >> -shift
    } else {
        bits << shift
    };
    value as u8
}

fn pack(channel: u8, shift: i32) -> u32 {
    let channel = channel as u32;
    if shift < 0 {
        channel << -shift
    } else {
        channel >> shift
    }
}

/// How pixel codes map to colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Palette {
    /// Pixels index into an ordered color table.
    Indexed(Vec<Rgb>),
    /// Pixels hold composed channel bits.
    Direct(DirectPalette),
}

impl Palette {
    /// An indexed palette over `colors`.
    pub fn indexed(colors: Vec<Rgb>) -> Self {
        Self::Indexed(colors)
    }

    /// An 8-8-8 direct palette.
    pub fn direct() -> Self {
        Self::Direct(DirectPalette::rgb888())
    }

    /// Whether pixels hold channel bits directly.
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct(_))
    }

    /// The color a pixel code stands for.
    ///
    /// # Panics
    ///
    /// Panics if an indexed code is outside the color table.
    pub fn rgb(&self, pixel: u32) -> Rgb {
        match self {
            Self::Indexed(colors) => colors[pixel as usize],
            Self::Direct(layout) => layout.decode(pixel),
        }
    }
}

/// Width x height pixel codes with their palette and an optional alpha plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    palette: Palette,
    pixels: Vec<u32>,
    alpha: Option<Vec<u8>>,
}

impl Raster {
    /// A raster with every pixel code set to zero.
    ///
    /// Fails for a non-empty raster over an empty color table.
    pub fn new(width: u32, height: u32, palette: Palette) -> RasterResult<Self> {
        let pixels = vec![0; width as usize * height as usize];
        Self::with_pixels(width, height, palette, pixels)
    }

    /// A raster over existing pixel codes.
    pub fn with_pixels(
        width: u32,
        height: u32,
        palette: Palette,
        pixels: Vec<u32>,
    ) -> RasterResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(RasterError::pixel_count(width, height, pixels.len()));
        }
        if let Palette::Indexed(colors) = &palette {
            if let Some(&index) = pixels.iter().find(|&&p| p as usize >= colors.len()) {
                return Err(RasterError::IndexOutOfRange {
                    index,
                    len: colors.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            palette,
            pixels,
            alpha: None,
        })
    }

    /// Attach a per-pixel alpha plane.
    pub fn with_alpha(mut self, alpha: Vec<u8>) -> RasterResult<Self> {
        if alpha.len() != self.pixels.len() {
            return Err(RasterError::AlphaLengthMismatch {
                expected: self.pixels.len(),
                actual: alpha.len(),
            });
        }
        self.alpha = Some(alpha);
        Ok(self)
    }

    /// Build a direct 8-8-8 raster from RGBA image data, keeping alpha.
    pub fn from_rgba8(image: &RgbaImage) -> Self {
        let layout = DirectPalette::rgb888();
        let (width, height) = image.dimensions();
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        let mut alpha = Vec::with_capacity(pixels.capacity());
        for px in image.pixels() {
            let [r, g, b, a] = px.0;
            pixels.push(layout.encode(Rgb::new(r, g, b)));
            alpha.push(a);
        }
        Self {
            width,
            height,
            palette: Palette::Direct(layout),
            pixels,
            alpha: Some(alpha),
        }
    }

    /// Convert to RGBA image data. Pixels without alpha are opaque.
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.rgb_at(x, y);
            let alpha = self
                .alpha
                .as_ref()
                .map_or(255, |alpha| alpha[self.offset(x, y)]);
            image::Rgba([color.red, color.green, color.blue, alpha])
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The alpha plane, if any.
    pub fn alpha(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }

    /// All pixel codes, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// The pixel code at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.offset(x, y)]
    }

    /// Overwrite the pixel code at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: u32) {
        let offset = self.offset(x, y);
        self.pixels[offset] = pixel;
    }

    /// The color at `(x, y)`.
    pub fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        self.palette.rgb(self.pixel(x, y))
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Palette, &mut [u32]) {
        (&mut self.palette, &mut self.pixels)
    }
}
