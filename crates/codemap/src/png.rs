//! PNG output through the `image` crate.

use std::io::Write;

use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};

use crate::{error::Result, CodemapError, Image, RasterTarget};

/// Writes each image it receives as an 8-bit RGB PNG.
pub struct PngTarget<W: Write> {
    writer: W,
}

impl<W: Write> PngTarget<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RasterTarget for PngTarget<W> {
    type Error = CodemapError;

    fn encode(&mut self, image: &Image) -> Result<()> {
        let (width, height) = image.dimensions()?;
        PngEncoder::new(&mut self.writer).write_image(
            image.as_bytes(),
            width,
            height,
            ColorType::Rgb8,
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Encode an image into an in-memory PNG file.
pub fn encode_png(image: &Image) -> Result<Vec<u8>> {
    let mut target = PngTarget::new(Vec::new());
    target.encode(image)?;
    Ok(target.into_inner())
}
