//! Graphics support via embedded-graphics
//!
//! This module provides [`FrameBuffer`], an RGB565 pixel buffer implementing
//! [`DrawTarget`]. It also implements `AsRef<[u16]>`, so it can be handed to a
//! [`Sequencer`](crate::Sequencer) as the pixel table and redrawn between frames
//! through [`Sequencer::pixels_mut`](crate::Sequencer::pixels_mut).
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use tft8080::{Dimensions, FrameBuffer};
//!
//! let dims = match Dimensions::new(32, 16) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let mut fb = match FrameBuffer::new(dims, vec![0u16; dims.pixel_count()]) {
//!     Ok(fb) => fb,
//!     Err(_) => return,
//! };
//!
//! let _ = fb.clear(Rgb565::BLACK);
//! let _ = Rectangle::new(Point::new(2, 2), Size::new(8, 4))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut fb);
//!
//! assert_eq!(fb.pixel(2, 2), Some(Rgb565::RED.into_storage()));
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{IntoStorage, Rgb565},
    prelude::Pixel,
};

use crate::config::Dimensions;
use crate::error::BuilderError;

/// Row-major RGB565 frame buffer
///
/// ## Type Parameters
///
/// * `B` - Buffer type implementing `AsRef<[u16]>` and `AsMut<[u16]>`
pub struct FrameBuffer<B> {
    dimensions: Dimensions,
    buffer: B,
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    /// Wrap `buffer` as a frame of `dimensions`
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::TableTooShort` if the buffer holds fewer than
    /// `dimensions.pixel_count()` words.
    pub fn new(dimensions: Dimensions, buffer: B) -> Result<Self, BuilderError> {
        let provided = buffer.as_ref().len();
        let required = dimensions.pixel_count();
        if provided < required {
            return Err(BuilderError::TableTooShort {
                table: crate::error::TableKind::Pixels,
                required,
                provided,
            });
        }
        Ok(Self { dimensions, buffer })
    }

    /// Raw RGB565 word at (`x`, `y`)
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        self.offset(x, y).and_then(|i| self.buffer.as_ref().get(i)).copied()
    }

    /// Frame dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Release the underlying buffer
    pub fn into_inner(self) -> B {
        self.buffer
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.dimensions.width && y < self.dimensions.height)
            .then(|| y as usize * self.dimensions.width as usize + x as usize)
    }
}

impl<B> AsRef<[u16]> for FrameBuffer<B>
where
    B: AsRef<[u16]>,
{
    fn as_ref(&self) -> &[u16] {
        self.buffer.as_ref()
    }
}

impl<B> DrawTarget for FrameBuffer<B>
where
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                continue;
            };
            if let Some(i) = self.offset(x, y) {
                if let Some(word) = self.buffer.as_mut().get_mut(i) {
                    *word = color.into_storage();
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let count = self.dimensions.pixel_count();
        let raw = color.into_storage();
        for word in self.buffer.as_mut().iter_mut().take(count) {
            *word = raw;
        }
        Ok(())
    }
}

impl<B> OriginDimensions for FrameBuffer<B> {
    fn size(&self) -> Size {
        Size::new(
            u32::from(self.dimensions.width),
            u32::from(self.dimensions.height),
        )
    }
}
