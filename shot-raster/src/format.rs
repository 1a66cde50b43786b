//! Pixel format descriptions and raw-channel conversions.
//!
//! This module defines the [`PixelFormat`] type which describes how pixels are
//! stored in a surface's byte buffer, and [`Color`], the structured RGBA8888
//! value used by the accessor API.
//!
//! # Pixel Format Components
//!
//! - **bits_per_pixel**: Storage size in bits (typically 16 or 32)
//! - **depth**: Actual color depth (sum of significant bits in R, G, B channels)
//! - **big_endian**: Byte order for multi-byte pixels
//! - **red/green/blue_max**: Maximum value for each color channel (e.g., 255 for 8-bit)
//! - **red/green/blue_shift**: Bit position of the least significant bit of each channel
//! - **alpha_max/alpha_shift**: Alpha channel, where `alpha_max == 0` means the
//!   format carries no alpha and decoded pixels are always fully opaque
//!
//! # Canonical Primitive
//!
//! [`PixelFormat::decode`] and [`PixelFormat::encode`] are the single
//! raw-channel read/write primitive for the crate. The structured-color and
//! byte-buffer access shapes on the accessors are thin conversions over these
//! two functions; no format logic lives anywhere else.
//!
//! # Example
//!
//! ```
//! use shot_raster::{Color, PixelFormat};
//!
//! let pf = PixelFormat::rgb888();
//! assert_eq!(pf.bytes_per_pixel(), 4);
//! assert!(!pf.has_alpha());
//!
//! let mut raw = [0u8; 4];
//! pf.encode(Color::new(0xAA, 0xBB, 0xCC, 0xFF), &mut raw);
//! // Little-endian 0x00AABBCC: blue, green, red, padding
//! assert_eq!(raw, [0xCC, 0xBB, 0xAA, 0x00]);
//! assert_eq!(pf.decode(&raw), Color::new(0xAA, 0xBB, 0xCC, 0xFF));
//! ```

/// A structured RGBA8888 color value.
///
/// Alpha is carried through the accessor API regardless of format; formats
/// without an alpha channel drop it on encode and report full opacity on
/// decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black. Sentinel for excluded reads on alpha formats.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    /// Opaque black. Sentinel for excluded reads on opaque formats, and the
    /// neutral value returned by inert accessors.
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Describes how pixels are encoded in a surface's byte buffer.
///
/// Only true-color (direct color) formats are supported; indexed/palette
/// formats are implemented as separate surfaces that expand on access.
///
/// # Standard Formats
///
/// - [`PixelFormat::rgb888()`] - 32bpp, 8 bits per channel, no alpha
/// - [`PixelFormat::rgba8888()`] - 32bpp, 8 bits per channel plus alpha
/// - [`PixelFormat::rgb565()`] - 16bpp, 5/6/5 bits
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct PixelFormat {
    /// Bits used per pixel (storage width), e.g. 32 for RGB888.
    pub bits_per_pixel: u8,

    /// Actual color depth (sum of significant bits), e.g. 24 for RGB888.
    pub depth: u8,

    /// Byte order for multi-byte pixels (`true` = big endian).
    pub big_endian: bool,

    /// Maximum valid red component value in this format.
    pub red_max: u16,

    /// Maximum valid green component value in this format.
    pub green_max: u16,

    /// Maximum valid blue component value in this format.
    pub blue_max: u16,

    /// Maximum valid alpha component value; 0 means no alpha channel.
    pub alpha_max: u16,

    /// Bit shift for the least significant bit of the red component.
    pub red_shift: u8,

    /// Bit shift for the least significant bit of the green component.
    pub green_shift: u8,

    /// Bit shift for the least significant bit of the blue component.
    pub blue_shift: u8,

    /// Bit shift for the least significant bit of the alpha component.
    pub alpha_shift: u8,
}

impl PixelFormat {
    /// Returns bytes-per-pixel (storage width), rounded up to the nearest byte.
    pub fn bytes_per_pixel(&self) -> u8 {
        self.bits_per_pixel.div_ceil(8)
    }

    /// True if this format carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.alpha_max > 0
    }

    /// Standard little-endian 32bpp RGB888 format, no alpha.
    ///
    /// Red at bit 16, green at bit 8, blue at bit 0. In memory a pixel with
    /// R=0xAA, G=0xBB, B=0xCC is stored as `[0xCC, 0xBB, 0xAA, 0x00]`.
    pub fn rgb888() -> Self {
        Self {
            bits_per_pixel: 32,
            depth: 24,
            big_endian: false,
            red_max: 255,
            green_max: 255,
            blue_max: 255,
            alpha_max: 0,
            red_shift: 16,
            green_shift: 8,
            blue_shift: 0,
            alpha_shift: 0,
        }
    }

    /// Little-endian 32bpp RGBA8888 format with alpha at bit 24.
    pub fn rgba8888() -> Self {
        Self {
            bits_per_pixel: 32,
            depth: 32,
            big_endian: false,
            red_max: 255,
            green_max: 255,
            blue_max: 255,
            alpha_max: 255,
            red_shift: 16,
            green_shift: 8,
            blue_shift: 0,
            alpha_shift: 24,
        }
    }

    /// Little-endian 16bpp RGB565 format, no alpha.
    pub fn rgb565() -> Self {
        Self {
            bits_per_pixel: 16,
            depth: 16,
            big_endian: false,
            red_max: 31,
            green_max: 63,
            blue_max: 31,
            alpha_max: 0,
            red_shift: 11,
            green_shift: 5,
            blue_shift: 0,
            alpha_shift: 0,
        }
    }

    /// Decodes one pixel from raw channel bytes.
    ///
    /// Formats without an alpha channel decode as fully opaque.
    ///
    /// # Panics
    ///
    /// Panics if `raw.len()` does not equal `self.bytes_per_pixel()`, or if
    /// any RGB channel max is zero (invalid format).
    ///
    /// # Algorithm
    ///
    /// 1. Assemble bytes into a u32 value according to endianness
    /// 2. Extract each component by shifting and masking
    /// 3. Scale each component from its format range to 0-255
    pub fn decode(&self, raw: &[u8]) -> Color {
        let bpp = self.bytes_per_pixel() as usize;
        assert_eq!(
            raw.len(),
            bpp,
            "pixel length {} does not match bytes_per_pixel {}",
            raw.len(),
            bpp
        );
        assert!(self.red_max > 0, "red_max must be > 0");
        assert!(self.green_max > 0, "green_max must be > 0");
        assert!(self.blue_max > 0, "blue_max must be > 0");

        // Assemble pixel value from bytes according to endianness
        let mut value = 0u32;
        if self.big_endian {
            for &byte in raw.iter().take(bpp) {
                value = (value << 8) | (byte as u32);
            }
        } else {
            for (i, &byte) in raw.iter().take(bpp).enumerate() {
                value |= (byte as u32) << (i * 8);
            }
        }

        let r = (value >> self.red_shift) & (self.red_max as u32);
        let g = (value >> self.green_shift) & (self.green_max as u32);
        let b = (value >> self.blue_shift) & (self.blue_max as u32);

        // Rounded scaling so that a decode/encode cycle is a projection:
        // truncating a color once and truncating it again gives the same value.
        let a = if self.has_alpha() {
            let max = self.alpha_max as u32;
            let a = (value >> self.alpha_shift) & max;
            ((a * 255 + max / 2) / max) as u8
        } else {
            255
        };

        Color::new(
            ((r * 255 + self.red_max as u32 / 2) / self.red_max as u32) as u8,
            ((g * 255 + self.green_max as u32 / 2) / self.green_max as u32) as u8,
            ((b * 255 + self.blue_max as u32 / 2) / self.blue_max as u32) as u8,
            a,
        )
    }

    /// Encodes a color into raw channel bytes.
    ///
    /// Formats without an alpha channel drop the alpha component.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` does not equal `self.bytes_per_pixel()`.
    pub fn encode(&self, color: Color, out: &mut [u8]) {
        let bpp = self.bytes_per_pixel() as usize;
        assert_eq!(
            out.len(),
            bpp,
            "output length {} does not match bytes_per_pixel {}",
            out.len(),
            bpp
        );

        // Scale from 8-bit to format range, rounding to the nearest step
        let r = (color.r as u32 * self.red_max as u32 + 127) / 255;
        let g = (color.g as u32 * self.green_max as u32 + 127) / 255;
        let b = (color.b as u32 * self.blue_max as u32 + 127) / 255;

        let mut value = (r << self.red_shift) | (g << self.green_shift) | (b << self.blue_shift);
        if self.has_alpha() {
            let a = (color.a as u32 * self.alpha_max as u32 + 127) / 255;
            value |= a << self.alpha_shift;
        }

        // Write bytes according to endianness
        if self.big_endian {
            for i in 0..bpp {
                out[bpp - 1 - i] = (value & 0xFF) as u8;
                value >>= 8;
            }
        } else {
            for item in out.iter_mut().take(bpp) {
                *item = (value & 0xFF) as u8;
                value >>= 8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::rgb888().bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::rgb565().bytes_per_pixel(), 2);

        let pf_12bit = PixelFormat {
            bits_per_pixel: 12,
            depth: 12,
            big_endian: false,
            red_max: 15,
            green_max: 15,
            blue_max: 15,
            alpha_max: 0,
            red_shift: 8,
            green_shift: 4,
            blue_shift: 0,
            alpha_shift: 0,
        };
        assert_eq!(pf_12bit.bytes_per_pixel(), 2); // 12 bits rounds up to 2 bytes
    }

    #[test]
    fn test_alpha_capability() {
        assert!(!PixelFormat::rgb888().has_alpha());
        assert!(!PixelFormat::rgb565().has_alpha());
        assert!(PixelFormat::rgba8888().has_alpha());
    }

    #[test]
    fn test_decode_little_endian() {
        let pf = PixelFormat::rgb888();

        // 0x00112233 little-endian = [0x33, 0x22, 0x11, 0x00]
        let raw = [0x33, 0x22, 0x11, 0x00];
        assert_eq!(pf.decode(&raw), Color::new(0x11, 0x22, 0x33, 0xFF));
    }

    #[test]
    fn test_encode_little_endian() {
        let pf = PixelFormat::rgb888();

        let mut raw = [0u8; 4];
        pf.encode(Color::new(0xAA, 0xBB, 0xCC, 0xFF), &mut raw);
        // 0x00AABBCC little-endian = [0xCC, 0xBB, 0xAA, 0x00]
        assert_eq!(raw, [0xCC, 0xBB, 0xAA, 0x00]);
    }

    #[test]
    fn test_big_endian_round_trip() {
        let pf = PixelFormat {
            big_endian: true,
            ..PixelFormat::rgb888()
        };

        // 0x00112233 big-endian = [0x00, 0x11, 0x22, 0x33]
        let raw = [0x00, 0x11, 0x22, 0x33];
        assert_eq!(pf.decode(&raw), Color::new(0x11, 0x22, 0x33, 0xFF));

        let mut out = [0u8; 4];
        pf.encode(Color::new(0xAA, 0xBB, 0xCC, 0xFF), &mut out);
        assert_eq!(out, [0x00, 0xAA, 0xBB, 0xCC]);
        assert_eq!(pf.decode(&out), Color::new(0xAA, 0xBB, 0xCC, 0xFF));
    }

    #[test]
    fn test_alpha_round_trip() {
        let pf = PixelFormat::rgba8888();

        let mut raw = [0u8; 4];
        pf.encode(Color::new(0x10, 0x20, 0x30, 0x80), &mut raw);
        assert_eq!(pf.decode(&raw), Color::new(0x10, 0x20, 0x30, 0x80));
    }

    #[test]
    fn test_opaque_format_drops_alpha() {
        let pf = PixelFormat::rgb888();

        let mut raw = [0u8; 4];
        pf.encode(Color::new(0x10, 0x20, 0x30, 0x42), &mut raw);
        // Alpha is dropped on encode and reported as opaque on decode.
        assert_eq!(pf.decode(&raw), Color::new(0x10, 0x20, 0x30, 0xFF));
    }

    #[test]
    fn test_rgb565_max_values() {
        let pf = PixelFormat::rgb565();

        let mut raw = [0u8; 2];
        pf.encode(Color::opaque(255, 255, 255), &mut raw);
        assert_eq!(pf.decode(&raw), Color::opaque(255, 255, 255));
    }

    #[test]
    #[should_panic(expected = "pixel length")]
    fn test_decode_wrong_size_panics() {
        let pf = PixelFormat::rgb888();
        pf.decode(&[0x11, 0x22]); // Only 2 bytes, need 4
    }

    #[test]
    #[should_panic(expected = "red_max must be > 0")]
    fn test_decode_zero_max_panics() {
        let pf = PixelFormat {
            red_max: 0,
            ..PixelFormat::rgb888()
        };
        pf.decode(&[0, 0, 0, 0]);
    }

    proptest! {
        /// Any 8-bit color survives an rgba8888 encode/decode cycle exactly.
        #[test]
        fn prop_rgba8888_round_trip(r: u8, g: u8, b: u8, a: u8) {
            let pf = PixelFormat::rgba8888();
            let mut raw = [0u8; 4];
            pf.encode(Color::new(r, g, b, a), &mut raw);
            prop_assert_eq!(pf.decode(&raw), Color::new(r, g, b, a));
        }

        /// RGB565 round-trips modulo channel precision: re-encoding the
        /// decoded value must reproduce the same raw bytes.
        #[test]
        fn prop_rgb565_stable_after_truncation(r: u8, g: u8, b: u8) {
            let pf = PixelFormat::rgb565();
            let mut first = [0u8; 2];
            pf.encode(Color::opaque(r, g, b), &mut first);
            let truncated = pf.decode(&first);
            let mut second = [0u8; 2];
            pf.encode(truncated, &mut second);
            prop_assert_eq!(first, second);
        }
    }
}
