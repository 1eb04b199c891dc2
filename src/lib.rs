#![cfg_attr(not(test), no_std)]

//! Watchface renderer for a small 2-bit-per-channel display.
//!
//! The core is [`raster::fill_rotated_rect`]: it paints a rectangle rotated
//! around a center straight into a row-addressable frame buffer, with a one
//! pixel anti-aliased edge. The rest of the crate is what a watchface needs
//! around it: packed colors and blending, fixed-point trig, scoped frame
//! buffer access, clock math and the watchface layers.

pub mod clock;
pub mod color;
pub mod error;
pub mod raster;
pub mod surface;
pub mod trig;
pub mod watchface;

pub use clock::{unix_to_datetime, DateTime, HandAngles};
pub use color::{blend, Argb2222, BLEND_MAX};
pub use error::RenderError;
pub use raster::{fill_rotated_rect, rotated_bounds, RasterStats, RotatedRect, RowBuffer, RowSpan};
pub use surface::{DisplayShape, FrameGuard, FrameHost, Framebuffer};
pub use trig::{SineTable, Trig, TRIG_MAX_ANGLE, TRIG_MAX_RATIO};
pub use watchface::{Watchface, WatchfaceConfig};
