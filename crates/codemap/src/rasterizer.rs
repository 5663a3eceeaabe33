use crate::{error::Result, ColorTable, Grid, GridBuilder, Image, RasterTarget, TokenType};

/// Turns token streams into codemap images.
///
/// Holds nothing but a shared reference to the color table, so one rasterizer
/// per file (or one per thread) is cheap.
#[derive(Clone, Copy, Debug)]
pub struct Rasterizer<'t> {
    colors: &'t ColorTable,
}

impl<'t> Rasterizer<'t> {
    pub fn new(colors: &'t ColorTable) -> Self {
        Self { colors }
    }

    pub fn grid<I, S>(&self, tokens: I) -> Result<Grid>
    where
        I: IntoIterator<Item = (TokenType, S)>,
        S: AsRef<str>,
    {
        self.try_grid(tokens.into_iter().map(Ok))
    }

    /// Build the grid from a fallible token stream; the first lexer error aborts.
    pub fn try_grid<I, S>(&self, tokens: I) -> Result<Grid>
    where
        I: IntoIterator<Item = Result<(TokenType, S)>>,
        S: AsRef<str>,
    {
        let mut builder = GridBuilder::new(self.colors);
        for token in tokens {
            let (ty, text) = token?;
            builder.push(&ty, text.as_ref())?;
        }
        let grid = builder.finish()?;
        tracing::trace!(rows = grid.len(), width = grid.width(), "built grid");
        Ok(grid)
    }

    pub fn rasterize<I, S>(&self, tokens: I) -> Result<Image>
    where
        I: IntoIterator<Item = (TokenType, S)>,
        S: AsRef<str>,
    {
        self.try_rasterize(tokens.into_iter().map(Ok))
    }

    pub fn try_rasterize<I, S>(&self, tokens: I) -> Result<Image>
    where
        I: IntoIterator<Item = Result<(TokenType, S)>>,
        S: AsRef<str>,
    {
        let grid = self.try_grid(tokens)?;
        Image::from_grid(&grid, self.colors.background())
    }

    /// Rasterize and hand the image to `target`, which is invoked exactly once
    /// and only when rasterization succeeded.
    pub fn render<I, S, T>(&self, tokens: I, target: &mut T) -> std::result::Result<(), T::Error>
    where
        I: IntoIterator<Item = (TokenType, S)>,
        S: AsRef<str>,
        T: RasterTarget,
    {
        let image = self.rasterize(tokens)?;
        target.encode(&image)
    }

    pub fn try_render<I, S, T>(
        &self,
        tokens: I,
        target: &mut T,
    ) -> std::result::Result<(), T::Error>
    where
        I: IntoIterator<Item = Result<(TokenType, S)>>,
        S: AsRef<str>,
        T: RasterTarget,
    {
        let image = self.try_rasterize(tokens)?;
        target.encode(&image)
    }
}
