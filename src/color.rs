//! Packed 2-bit-per-channel color, the native pixel format of the watch panel.
//!
//! One byte per pixel, laid out `AARRGGBB`. Each channel has four intensity
//! levels (0..=3). The alpha pair only marks a pixel as opaque (`0b11`); the
//! frame buffer never stores translucent colors, blending happens before the
//! write.

use bytemuck::{Pod, Zeroable};
use embedded_graphics::pixelcolor::raw::RawU8;
use embedded_graphics::pixelcolor::{PixelColor, Rgb565, Rgb888};
use embedded_graphics::prelude::RgbColor;

/// Full-scale blend weight: `blend(BLEND_MAX, c0, c1) == c1`.
pub const BLEND_MAX: i32 = 1 << 16;

const CHANNEL_MASK: u8 = 0b11;
const OPAQUE: u8 = 0b11;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Argb2222(u8);

// SAFETY: transparent wrapper over `u8`, every bit pattern is a valid color.
unsafe impl Zeroable for Argb2222 {}
// SAFETY: see above; no padding, no invalid values.
unsafe impl Pod for Argb2222 {}

impl Argb2222 {
    pub const CLEAR: Self = Self::from_channels(0, 0, 0, 0);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(3, 3, 3);
    pub const RED: Self = Self::from_rgb(3, 0, 0);
    pub const GREEN: Self = Self::from_rgb(0, 3, 0);
    pub const YELLOW: Self = Self::from_rgb(3, 3, 0);

    // Named colors of the watch palette (0xAA5500, 0xAAAA55, ...)
    pub const WINDSOR_TAN: Self = Self::from_rgb(2, 1, 0);
    pub const BRASS: Self = Self::from_rgb(2, 2, 1);
    pub const LIMERICK: Self = Self::from_rgb(2, 2, 0);
    pub const PASTEL_YELLOW: Self = Self::from_rgb(3, 3, 2);
    pub const RAJAH: Self = Self::from_rgb(3, 2, 1);
    pub const MEDIUM_AQUAMARINE: Self = Self::from_rgb(1, 3, 2);

    /// Raw packed byte.
    #[inline]
    pub const fn from_argb(raw: u8) -> Self {
        Self(raw)
    }

    /// Build from four 2-bit levels; higher bits of each input are dropped.
    #[inline]
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(
            (a & CHANNEL_MASK) << 6
                | (r & CHANNEL_MASK) << 4
                | (g & CHANNEL_MASK) << 2
                | (b & CHANNEL_MASK),
        )
    }

    /// Opaque color from three 2-bit levels.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_channels(OPAQUE, r, g, b)
    }

    /// Quantize a `0xRRGGBB` literal by keeping the two top bits of each channel.
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb((rgb >> 22) as u8, (rgb >> 14) as u8, (rgb >> 6) as u8)
    }

    #[inline]
    pub const fn argb(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 >> 6
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 4) & CHANNEL_MASK
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 2) & CHANNEL_MASK
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 & CHANNEL_MASK
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a() == OPAQUE
    }
}

/// Mix `c1` over `c0` with weight `alpha` in `0..=BLEND_MAX`.
///
/// Each channel is interpolated in its own 2-bit domain and rounded half up.
/// The result is always opaque. `alpha` outside the range is clamped.
pub fn blend(alpha: i32, c0: Argb2222, c1: Argb2222) -> Argb2222 {
    let alpha = alpha.clamp(0, BLEND_MAX) as u32;
    let beta = BLEND_MAX as u32 - alpha;

    let mix = |lo: u8, hi: u8| -> u8 {
        ((hi as u32 * alpha + lo as u32 * beta + (1 << 15)) >> 16) as u8
    };

    Argb2222::from_rgb(mix(c0.r(), c1.r()), mix(c0.g(), c1.g()), mix(c0.b(), c1.b()))
}

// -------------------- embedded-graphics integration --------------------

impl PixelColor for Argb2222 {
    type Raw = RawU8;
}

impl From<Rgb888> for Argb2222 {
    fn from(c: Rgb888) -> Self {
        Self::from_rgb(c.r() >> 6, c.g() >> 6, c.b() >> 6)
    }
}

impl From<Argb2222> for Rgb888 {
    fn from(c: Argb2222) -> Self {
        // 0, 85, 170, 255
        Rgb888::new(c.r() * 85, c.g() * 85, c.b() * 85)
    }
}

impl From<Argb2222> for Rgb565 {
    fn from(c: Argb2222) -> Self {
        let five = |l: u8| (l as u16 * 31 + 1) as u8 / 3;
        Rgb565::new(five(c.r()), c.g() * 21, five(c.b()))
    }
}
