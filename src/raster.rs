//! Rotated-rectangle rasterizer with a one pixel anti-aliased edge.
//!
//! A rectangle is given in its own unrotated frame (offsets from the rotation
//! center), then painted rotated by `angle` around `center`:
//!
//! 1. The four corners are rotated to get a device bounding box. Minima are
//!    floored and maxima rounded up so no edge pixel is clipped.
//! 2. Each bounding-box row is clipped to the writable extent the host
//!    reports for it. Rows without data are skipped.
//! 3. Each candidate pixel is rotated back into the rectangle frame and its
//!    distance to the four edges is measured in fixed point. Pixels within one
//!    pixel of an edge are blended with the current content, weighted by that
//!    distance; deeper pixels are overwritten.

use core::ops::AddAssign;

use embedded_graphics::prelude::Point;
use log::{debug, trace, warn};

use crate::color::{blend, Argb2222};
use crate::error::RenderError;
use crate::trig::{Trig, TRIG_MAX_RATIO};

const FIXED_SHIFT: u32 = 16;
// Rounds the bounding-box maxima up; minima are only shifted (floored).
const ROUND_UP_BIAS: i64 = 0x7FFF;
const SCALE: i64 = TRIG_MAX_RATIO as i64;

/// One rectangle to paint: two opposite corners in the rectangle's own frame,
/// the device-space rotation center, the angle, and a solid color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RotatedRect {
    pub pt1: Point,
    pub pt2: Point,
    pub center: Point,
    pub angle: i32,
    pub color: Argb2222,
}

impl RotatedRect {
    pub const fn new(pt1: Point, pt2: Point, center: Point, angle: i32, color: Argb2222) -> Self {
        Self { pt1, pt2, center, angle, color }
    }

    /// `pt1` must be the strict top-left of `pt2`.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.pt1.x >= self.pt2.x || self.pt1.y >= self.pt2.y
    }

    /// Corners and center all fit 16-bit device coordinates.
    pub fn in_coordinate_range(&self) -> bool {
        let fits = |v: i32| i16::try_from(v).is_ok();
        [self.pt1, self.pt2, self.center]
            .iter()
            .all(|p| fits(p.x) && fits(p.y))
    }
}

/// A device row's storage, indexed by absolute column, with its writable
/// extent `min_x..=max_x`.
#[derive(Debug)]
pub struct RowSpan<'a> {
    pixels: &'a mut [Argb2222],
    min_x: i32,
    max_x: i32,
}

impl<'a> RowSpan<'a> {
    /// The extent is narrowed so it never leaves `pixels`.
    pub fn new(pixels: &'a mut [Argb2222], min_x: i32, max_x: i32) -> Self {
        let last = i32::try_from(pixels.len()).unwrap_or(i32::MAX) - 1;
        Self {
            min_x: min_x.max(0),
            max_x: max_x.min(last),
            pixels,
        }
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    #[inline]
    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    #[inline]
    pub fn contains(&self, x: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x)
    }

    pub fn get(&self, x: i32) -> Option<Argb2222> {
        self.contains(x).then(|| self.pixels[x as usize])
    }

    /// Writes only inside the extent; returns whether the pixel was written.
    pub fn set(&mut self, x: i32, color: Argb2222) -> bool {
        if !self.contains(x) {
            return false;
        }
        self.pixels[x as usize] = color;
        true
    }
}

/// Row-addressable pixel storage supplied by the host.
pub trait RowBuffer {
    /// `None` when the row is not on the visible surface.
    fn row(&mut self, y: i32) -> Option<RowSpan<'_>>;
}

impl<B: RowBuffer + ?Sized> RowBuffer for &mut B {
    fn row(&mut self, y: i32) -> Option<RowSpan<'_>> {
        (**self).row(y)
    }
}

/// Inclusive device-space bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeviceBounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

/// What a single [`fill_rotated_rect`] call touched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub rows_scanned: u32,
    pub rows_skipped: u32,
    pub solid: u32,
    pub blended: u32,
}

impl RasterStats {
    #[inline]
    pub fn painted(&self) -> u32 {
        self.solid + self.blended
    }
}

impl AddAssign for RasterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.rows_scanned += rhs.rows_scanned;
        self.rows_skipped += rhs.rows_skipped;
        self.solid += rhs.solid;
        self.blended += rhs.blended;
    }
}

#[inline]
fn rotate(p: Point, sin_a: i64, cos_a: i64) -> (i64, i64) {
    let (x, y) = (p.x as i64, p.y as i64);
    (x * cos_a - y * sin_a, y * cos_a + x * sin_a)
}

/// Smallest integer device box containing the rectangle rotated by `rect.angle`.
pub fn rotated_bounds<T: Trig + ?Sized>(trig: &T, rect: &RotatedRect) -> DeviceBounds {
    let sin_a = trig.sin_lookup(rect.angle) as i64;
    let cos_a = trig.cos_lookup(rect.angle) as i64;

    let corners = [
        rect.pt1,
        rect.pt2,
        Point::new(rect.pt1.x, rect.pt2.y),
        Point::new(rect.pt2.x, rect.pt1.y),
    ];

    let (mut x_min, mut x_max) = (i64::MAX, i64::MIN);
    let (mut y_min, mut y_max) = (i64::MAX, i64::MIN);
    for corner in corners {
        let (x, y) = rotate(corner, sin_a, cos_a);
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    // Saturate instead of wrapping for rectangles outside 16-bit coordinates
    let place = |v: i64, origin: i32| {
        (v + origin as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    };
    DeviceBounds {
        x_min: place(x_min >> FIXED_SHIFT, rect.center.x),
        x_max: place((x_max + ROUND_UP_BIAS) >> FIXED_SHIFT, rect.center.x),
        y_min: place(y_min >> FIXED_SHIFT, rect.center.y),
        y_max: place((y_max + ROUND_UP_BIAS) >> FIXED_SHIFT, rect.center.y),
    }
}

/// Paint `rect` into `buffer`, blending the one pixel wide border.
///
/// Only pixels inside each row's writable extent are read or written. A
/// rectangle entirely off the surface leaves the buffer untouched and still
/// returns `Ok`.
pub fn fill_rotated_rect<B, T>(
    buffer: &mut B,
    trig: &T,
    rect: &RotatedRect,
) -> Result<RasterStats, RenderError>
where
    B: RowBuffer + ?Sized,
    T: Trig + ?Sized,
{
    if rect.is_degenerate() {
        warn!("refusing degenerate rectangle {:?}..{:?}", rect.pt1, rect.pt2);
        return Err(RenderError::DegenerateRect);
    }
    if !rect.in_coordinate_range() {
        warn!(
            "refusing rectangle outside 16-bit coordinates: {:?}..{:?} at {:?}",
            rect.pt1, rect.pt2, rect.center
        );
        return Err(RenderError::CoordinateRange);
    }

    let sin_a = trig.sin_lookup(rect.angle) as i64;
    let cos_a = trig.cos_lookup(rect.angle) as i64;
    let bounds = rotated_bounds(trig, rect);

    // Edges of the rectangle in the same scale as the inverse-rotated pixels
    let left = rect.pt1.x as i64 * SCALE;
    let right = rect.pt2.x as i64 * SCALE;
    let top = rect.pt1.y as i64 * SCALE;
    let bottom = rect.pt2.y as i64 * SCALE;

    let mut stats = RasterStats::default();

    for y in bounds.y_min..=bounds.y_max {
        let Some(mut span) = buffer.row(y) else {
            trace!("row {y} has no data");
            stats.rows_skipped += 1;
            continue;
        };
        stats.rows_scanned += 1;

        let j_min = bounds.x_min.max(span.min_x());
        let j_max = bounds.x_max.min(span.max_x());
        let dy = (y - rect.center.y) as i64;

        for j in j_min..=j_max {
            let dx = (j - rect.center.x) as i64;

            // Rotate the pixel back by -angle into the rectangle's frame
            let rx = dx * cos_a + dy * sin_a;
            let ry = dy * cos_a - dx * sin_a;

            let d_left = rx - left;
            let d_right = right - rx;
            let d_top = ry - top;
            let d_bottom = bottom - ry;

            if d_left < 0 || d_right < 0 || d_top < 0 || d_bottom < 0 {
                continue;
            }

            let d_min = d_left.min(d_right).min(d_top).min(d_bottom);
            let color = if d_min <= SCALE {
                let Some(under) = span.get(j) else { continue };
                stats.blended += 1;
                blend(d_min as i32, under, rect.color)
            } else {
                stats.solid += 1;
                rect.color
            };
            span.set(j, color);
        }
    }

    debug!(
        "rotated rect angle={} bounds={:?} {:?}",
        rect.angle, bounds, stats
    );
    Ok(stats)
}
