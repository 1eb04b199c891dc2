//! Frame buffer access for one redraw.
//!
//! - `FrameHost` is the host side: capture the frame buffer, hand out row
//!   access, release it again.
//! - `FrameGuard` holds a capture for a scope and releases it on drop, so every
//!   early return still gives the buffer back.
//! - `Framebuffer` is an in-memory host over a borrowed byte slice, for
//!   rectangular or round panels. It also implements embedded-graphics
//!   `DrawTarget`, clipped to the same row extents.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::prelude::{OriginDimensions, Pixel, Size};
use log::trace;

use crate::color::Argb2222;
use crate::error::RenderError;
use crate::raster::{fill_rotated_rect, RasterStats, RotatedRect, RowBuffer, RowSpan};
use crate::trig::Trig;

/// Host that owns a frame buffer and lends it out for one redraw at a time.
pub trait FrameHost {
    type Buffer: RowBuffer;

    fn capture_frame_buffer(&mut self) -> Result<(), RenderError>;

    /// Only called between a successful capture and the matching release.
    fn frame_buffer(&mut self) -> &mut Self::Buffer;

    fn release_frame_buffer(&mut self);
}

/// Scoped capture of a host's frame buffer.
pub struct FrameGuard<'h, H: FrameHost> {
    host: &'h mut H,
}

impl<'h, H: FrameHost> FrameGuard<'h, H> {
    pub fn acquire(host: &'h mut H) -> Result<Self, RenderError> {
        host.capture_frame_buffer()?;
        Ok(Self { host })
    }

    #[inline]
    pub fn buffer(&mut self) -> &mut H::Buffer {
        self.host.frame_buffer()
    }

    pub fn fill_rotated_rect<T: Trig + ?Sized>(
        &mut self,
        trig: &T,
        rect: &RotatedRect,
    ) -> Result<RasterStats, RenderError> {
        fill_rotated_rect(self.buffer(), trig, rect)
    }
}

impl<H: FrameHost> Drop for FrameGuard<'_, H> {
    fn drop(&mut self) {
        self.host.release_frame_buffer();
    }
}

/// Physical outline of the panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayShape {
    Rect,
    /// Only the inscribed circle is visible and writable.
    Round,
}

/// In-memory frame buffer, one packed byte per pixel, row-major.
pub struct Framebuffer<'a> {
    pixels: &'a mut [Argb2222],
    width: u32,
    height: u32,
    shape: DisplayShape,
    captured: bool,
}

impl<'a> Framebuffer<'a> {
    /// Wrap `bytes`, which must hold exactly `width * height` pixels.
    pub fn new(
        bytes: &'a mut [u8],
        width: u32,
        height: u32,
        shape: DisplayShape,
    ) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize;
        if bytes.len() != expected {
            return Err(RenderError::BufferSize { expected, actual: bytes.len() });
        }
        Ok(Self {
            pixels: bytemuck::cast_slice_mut(bytes),
            width,
            height,
            shape,
            captured: false,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn shape(&self) -> DisplayShape {
        self.shape
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn pixels(&self) -> &[Argb2222] {
        &self.pixels[..]
    }

    /// Pixel at `(x, y)`, or `None` off the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Argb2222> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Writable columns of row `y`, inclusive.
    pub fn row_extent(&self, y: i32) -> Option<(i32, i32)> {
        if y < 0 || y as u32 >= self.height {
            return None;
        }
        let w = self.width as i32;
        match self.shape {
            DisplayShape::Rect => Some((0, w - 1)),
            DisplayShape::Round => {
                // Doubled coordinates keep pixel centers on integers:
                // (2x+1-w)^2 + (2y+1-h)^2 <= d^2
                let d = self.width.min(self.height) as i64;
                let dy2 = (2 * y + 1 - self.height as i32) as i64;
                let rem = d * d - dy2 * dy2;
                if rem < 0 {
                    return None;
                }
                let s = (rem as u64).isqrt() as i32;
                let min_x = (w - s).div_euclid(2).max(0);
                let max_x = (w - 1 + s).div_euclid(2).min(w - 1);
                (min_x <= max_x).then_some((min_x, max_x))
            }
        }
    }
}

impl RowBuffer for Framebuffer<'_> {
    fn row(&mut self, y: i32) -> Option<RowSpan<'_>> {
        let (min_x, max_x) = self.row_extent(y)?;
        let w = self.width as usize;
        let start = y as usize * w;
        Some(RowSpan::new(&mut self.pixels[start..start + w], min_x, max_x))
    }
}

impl FrameHost for Framebuffer<'_> {
    type Buffer = Self;

    fn capture_frame_buffer(&mut self) -> Result<(), RenderError> {
        if self.captured {
            return Err(RenderError::BufferAlreadyCaptured);
        }
        trace!("frame buffer captured");
        self.captured = true;
        Ok(())
    }

    fn frame_buffer(&mut self) -> &mut Self {
        self
    }

    fn release_frame_buffer(&mut self) {
        trace!("frame buffer released");
        self.captured = false;
    }
}

// -------------------- embedded-graphics integration --------------------

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer<'_> {
    type Color = Argb2222;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(mut span) = self.row(p.y) {
                span.set(p.x, c);
            }
        }
        Ok(())
    }
}
