use crate::{
    error::{CodemapError, Result},
    Grid, Rgb,
};

/// Pixel rows emitted for each grid row: the line twice, then a spacer.
pub(crate) const ROWS_PER_LINE: usize = 3;

/// Expanded RGB buffer, rows stored top to bottom with 3 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Image {
    /// Lay the grid out as pixels.
    ///
    /// Every grid row is right-padded with `background` to the grid width and
    /// written twice, followed by one all-background spacer row. A grid without
    /// rows or without any pixel is [`CodemapError::EmptyInput`].
    pub fn from_grid(grid: &Grid, background: Rgb) -> Result<Self> {
        let width = grid.width();
        let height = grid.len() * ROWS_PER_LINE;
        if width == 0 || height == 0 {
            return Err(CodemapError::EmptyInput);
        }

        let stride = width * 3;
        let mut data = Vec::with_capacity(stride * height);
        for row in grid.rows() {
            let start = data.len();
            for pixel in row {
                data.extend_from_slice(&pixel.to_array());
            }
            for _ in row.len()..width {
                data.extend_from_slice(&background.to_array());
            }
            data.extend_from_within(start..);
            for _ in 0..width {
                data.extend_from_slice(&background.to_array());
            }
        }
        debug_assert_eq!(data.len(), stride * height);

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width and height as the `u32` values image formats store.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let too_large = || CodemapError::ImageTooLarge {
            width: self.width,
            height: self.height,
        };
        let width = u32::try_from(self.width).map_err(|_| too_large())?;
        let height = u32::try_from(self.height).map_err(|_| too_large())?;
        Ok((width, height))
    }

    /// Pixel rows, each `3 * width` channel bytes.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.width * 3)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 3;
        let channels = &self.data[offset..offset + 3];
        Some(Rgb::new(channels[0], channels[1], channels[2]))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
