//! Test support utilities for codemap.
//!
//! This module provides helper types and functions that are useful for testing
//! rasterization, but are not part of the public API.

use crate::{CodemapError, Image, RasterTarget, Rgb, TokenType};

/// A memory target useful for tests.
///
/// Captures every encoded image as a list of pixel rows that can be inspected.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    pub images: Vec<Captured>,
}

/// One image as seen by a [`RasterTarget`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captured {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Rgb>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Captured> {
        self.images.last()
    }
}

impl RasterTarget for MemoryTarget {
    type Error = CodemapError;

    fn encode(&mut self, image: &Image) -> std::result::Result<(), Self::Error> {
        let rows = image
            .rows()
            .map(|row| {
                row.chunks_exact(3)
                    .map(|px| Rgb::new(px[0], px[1], px[2]))
                    .collect()
            })
            .collect();
        self.images.push(Captured {
            width: image.width(),
            height: image.height(),
            rows,
        });
        Ok(())
    }
}

/// Shorthand for building token streams: `token("comment", "// hi")`.
pub fn token(ty: &'static str, text: &'static str) -> (TokenType, &'static str) {
    (TokenType::from_static(ty), text)
}
