//! codemap: render source code as a pixel thumbnail.
//! Each character becomes one pixel colored by its token type, whitespace becomes
//! background, and every source line is drawn as two pixel rows plus a spacer row.

mod color;
mod error;
mod grid;
mod raster;
#[cfg(feature = "png")]
pub mod png;
mod rasterizer;
mod style;
#[cfg(feature = "syntax")]
pub mod syntax;
mod token;

pub use color::{ColorTable, Rgb};
pub use error::{CodemapError, Result};
pub use grid::{Grid, GridBuilder, Row};
pub use raster::Image;
pub use rasterizer::Rasterizer;
pub use style::{Style, TokenStyle};
pub use token::{Lineage, TokenType};

// Test utilities
pub mod test_support;

/// Sink for finished images.
///
/// Implementors receive the expanded pixel buffer exactly once per rendered file.
/// Their error type must absorb [`CodemapError`] so that rasterization failures and
/// encoder failures travel through the same `Result` unchanged.
pub trait RasterTarget {
    type Error: From<CodemapError>;

    fn encode(&mut self, image: &Image) -> std::result::Result<(), Self::Error>;
}

impl<T: RasterTarget + ?Sized> RasterTarget for &mut T {
    type Error = T::Error;

    fn encode(&mut self, image: &Image) -> std::result::Result<(), Self::Error> {
        (**self).encode(image)
    }
}
