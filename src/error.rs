//! Error type shared by the rasterizer, the frame buffer host and the watchface layers.

use core::fmt;

/// Everything that can go wrong while painting a frame.
///
/// Off-surface rows are not errors; the rasterizer skips them silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// `pt1`/`pt2` do not span a positive area (`pt1.x >= pt2.x` or `pt1.y >= pt2.y`).
    DegenerateRect,
    /// A corner or the center lies outside 16-bit device coordinates.
    CoordinateRange,
    /// The frame buffer was captured again before being released.
    BufferAlreadyCaptured,
    /// Backing storage does not match `width * height`.
    BufferSize { expected: usize, actual: usize },
    /// An embedded-graphics draw call failed on the target.
    Draw,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::DegenerateRect => {
                f.write_str("rectangle corners do not span a positive area")
            }
            RenderError::CoordinateRange => {
                f.write_str("rectangle coordinates exceed the 16-bit range")
            }
            RenderError::BufferAlreadyCaptured => f.write_str("frame buffer is already captured"),
            RenderError::BufferSize { expected, actual } => write!(
                f,
                "frame buffer holds {actual} pixels, expected {expected}"
            ),
            RenderError::Draw => f.write_str("draw target rejected a primitive"),
        }
    }
}

impl core::error::Error for RenderError {}
