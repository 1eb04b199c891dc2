//! Fixed-point sine/cosine in the watch's trig-angle units.
//!
//! A full turn is [`TRIG_MAX_ANGLE`]; results are scaled so that
//! [`TRIG_MAX_RATIO`] stands for 1.0. Angles grow clockwise on the y-down
//! screen, so angle 0 points at 12 o'clock.

use core::f64::consts::PI;

/// One full turn.
pub const TRIG_MAX_ANGLE: i32 = 0x10000;
/// Fixed-point 1.0.
pub const TRIG_MAX_RATIO: i32 = 0xFFFF;

const QUARTER_TURN: u32 = (TRIG_MAX_ANGLE / 4) as u32;
// 256 table steps per quarter turn, 64 angle units each
const STEP_SHIFT: u32 = 6;
const STEP_MASK: u32 = (1 << STEP_SHIFT) - 1;

/// Arc-minutes in one full turn.
const ARC_MINUTES_PER_TURN: i64 = 360 * 60;

/// Host-supplied trig lookup. Both functions are periodic in [`TRIG_MAX_ANGLE`].
pub trait Trig {
    fn sin_lookup(&self, angle: i32) -> i32;

    fn cos_lookup(&self, angle: i32) -> i32 {
        self.sin_lookup(angle.wrapping_add(TRIG_MAX_ANGLE / 4))
    }
}

/// sin(i * pi/512) * 0xFFFF, rounded, for i in 0..=256.
const SINE_QUARTER_WAVE: [u16; 257] = [
    0x0000, 0x0192, 0x0324, 0x04B6, 0x0648, 0x07DA, 0x096C, 0x0AFE,
    0x0C90, 0x0E21, 0x0FB3, 0x1144, 0x12D5, 0x1466, 0x15F7, 0x1787,
    0x1918, 0x1AA8, 0x1C37, 0x1DC7, 0x1F56, 0x20E5, 0x2274, 0x2402,
    0x2590, 0x271E, 0x28AB, 0x2A38, 0x2BC4, 0x2D50, 0x2EDC, 0x3067,
    0x31F1, 0x337B, 0x3505, 0x368E, 0x3817, 0x399F, 0x3B26, 0x3CAD,
    0x3E34, 0x3FB9, 0x413F, 0x42C3, 0x4447, 0x45CA, 0x474D, 0x48CF,
    0x4A50, 0x4BD0, 0x4D50, 0x4ECF, 0x504D, 0x51CB, 0x5347, 0x54C3,
    0x563E, 0x57B8, 0x5932, 0x5AAA, 0x5C22, 0x5D98, 0x5F0E, 0x6083,
    0x61F7, 0x636A, 0x64DC, 0x664D, 0x67BD, 0x692D, 0x6A9B, 0x6C08,
    0x6D74, 0x6EDF, 0x7049, 0x71B2, 0x7319, 0x7480, 0x75E5, 0x774A,
    0x78AD, 0x7A0F, 0x7B70, 0x7CD0, 0x7E2E, 0x7F8B, 0x80E7, 0x8242,
    0x839C, 0x84F4, 0x864B, 0x87A1, 0x88F5, 0x8A48, 0x8B9A, 0x8CEA,
    0x8E39, 0x8F87, 0x90D3, 0x921E, 0x9368, 0x94B0, 0x95F6, 0x973B,
    0x987F, 0x99C1, 0x9B02, 0x9C41, 0x9D7F, 0x9EBB, 0x9FF6, 0xA12F,
    0xA267, 0xA39D, 0xA4D2, 0xA604, 0xA736, 0xA865, 0xA993, 0xAAC0,
    0xABEB, 0xAD14, 0xAE3B, 0xAF61, 0xB085, 0xB1A7, 0xB2C8, 0xB3E7,
    0xB504, 0xB620, 0xB739, 0xB851, 0xB968, 0xBA7C, 0xBB8E, 0xBC9F,
    0xBDAE, 0xBEBB, 0xBFC7, 0xC0D0, 0xC1D8, 0xC2DD, 0xC3E1, 0xC4E3,
    0xC5E3, 0xC6E1, 0xC7DE, 0xC8D8, 0xC9D0, 0xCAC7, 0xCBBB, 0xCCAE,
    0xCD9E, 0xCE8D, 0xCF79, 0xD064, 0xD14C, 0xD233, 0xD317, 0xD3FA,
    0xD4DA, 0xD5B9, 0xD695, 0xD76F, 0xD847, 0xD91E, 0xD9F2, 0xDAC3,
    0xDB93, 0xDC61, 0xDD2C, 0xDDF6, 0xDEBD, 0xDF82, 0xE045, 0xE106,
    0xE1C5, 0xE281, 0xE33B, 0xE3F4, 0xE4A9, 0xE55D, 0xE60F, 0xE6BE,
    0xE76B, 0xE816, 0xE8BE, 0xE965, 0xEA09, 0xEAAB, 0xEB4A, 0xEBE7,
    0xEC82, 0xED1B, 0xEDB2, 0xEE46, 0xEED8, 0xEF67, 0xEFF5, 0xF07F,
    0xF108, 0xF18E, 0xF212, 0xF294, 0xF313, 0xF390, 0xF40B, 0xF483,
    0xF4F9, 0xF56D, 0xF5DE, 0xF64D, 0xF6B9, 0xF723, 0xF78B, 0xF7F0,
    0xF853, 0xF8B4, 0xF912, 0xF96D, 0xF9C7, 0xFA1E, 0xFA72, 0xFAC4,
    0xFB14, 0xFB61, 0xFBAC, 0xFBF4, 0xFC3A, 0xFC7E, 0xFCBF, 0xFCFD,
    0xFD3A, 0xFD73, 0xFDAB, 0xFDE0, 0xFE12, 0xFE42, 0xFE70, 0xFE9B,
    0xFEC3, 0xFEEA, 0xFF0D, 0xFF2F, 0xFF4D, 0xFF6A, 0xFF84, 0xFF9B,
    0xFFB0, 0xFFC3, 0xFFD3, 0xFFE0, 0xFFEB, 0xFFF4, 0xFFFA, 0xFFFE,
    0xFFFF,
];

/// Quarter-wave lookup table with linear interpolation between entries.
///
/// Exact at the four cardinal angles, within one unit of the true value elsewhere.
#[derive(Copy, Clone, Debug, Default)]
pub struct SineTable;

impl SineTable {
    pub const fn new() -> Self {
        SineTable
    }

    // sin over 0..=QUARTER_TURN
    fn quarter(offset: u32) -> i32 {
        let index = (offset >> STEP_SHIFT) as usize;
        let frac = (offset & STEP_MASK) as i32;
        let lo = SINE_QUARTER_WAVE[index] as i32;
        if frac == 0 {
            return lo;
        }
        let hi = SINE_QUARTER_WAVE[index + 1] as i32;
        lo + (((hi - lo) * frac + (1 << (STEP_SHIFT - 1))) >> STEP_SHIFT)
    }
}

impl Trig for SineTable {
    fn sin_lookup(&self, angle: i32) -> i32 {
        let a = angle.rem_euclid(TRIG_MAX_ANGLE) as u32;
        let offset = a % QUARTER_TURN;
        match a / QUARTER_TURN {
            0 => Self::quarter(offset),
            1 => Self::quarter(QUARTER_TURN - offset),
            2 => -Self::quarter(offset),
            _ => -Self::quarter(QUARTER_TURN - offset),
        }
    }
}

/// Float-backed lookup through `libm`, rounded to the same fixed-point scale.
#[derive(Copy, Clone, Debug, Default)]
pub struct LibmTrig;

impl LibmTrig {
    #[inline]
    fn radians(angle: i32) -> f64 {
        angle.rem_euclid(TRIG_MAX_ANGLE) as f64 * (2.0 * PI / TRIG_MAX_ANGLE as f64)
    }

    #[inline]
    fn to_ratio(v: f64) -> i32 {
        libm::round(v * TRIG_MAX_RATIO as f64) as i32
    }
}

impl Trig for LibmTrig {
    fn sin_lookup(&self, angle: i32) -> i32 {
        Self::to_ratio(libm::sin(Self::radians(angle)))
    }

    fn cos_lookup(&self, angle: i32) -> i32 {
        Self::to_ratio(libm::cos(Self::radians(angle)))
    }
}

impl<T: Trig + ?Sized> Trig for &T {
    fn sin_lookup(&self, angle: i32) -> i32 {
        (**self).sin_lookup(angle)
    }

    fn cos_lookup(&self, angle: i32) -> i32 {
        (**self).cos_lookup(angle)
    }
}

/// Round a `TRIG_MAX_RATIO`-scaled value to the nearest integer.
///
/// The scale is odd, so no input sits exactly on a half; `n + 0.5` is reached
/// at `TRIG_MAX_RATIO / 2 + 1` above `n`.
#[inline]
pub fn fixed_round(v: i32) -> i32 {
    ((v as i64 + (TRIG_MAX_RATIO / 2) as i64).div_euclid(TRIG_MAX_RATIO as i64)) as i32
}

/// `TRIG_MAX_ANGLE * units / units_per_turn`, e.g. seconds of a minute.
///
/// Returns 0 for a non-positive `units_per_turn`.
pub fn angle_of(units: i32, units_per_turn: i32) -> i32 {
    if units_per_turn <= 0 {
        return 0;
    }
    (TRIG_MAX_ANGLE as i64 * units as i64 / units_per_turn as i64) as i32
}

/// Convert arc-minutes (21600 per turn) to trig-angle units, rounded to nearest.
pub fn minute_index(arc_minutes: i32) -> i32 {
    let scaled = TRIG_MAX_ANGLE as i64 * arc_minutes as i64 + ARC_MINUTES_PER_TURN / 2;
    scaled.div_euclid(ARC_MINUTES_PER_TURN) as i32
}
