use std::collections::HashMap;

use crate::{
    error::{CodemapError, Result},
    ColorTable, Rgb, TokenType,
};

/// Pixels of one source line, one per character.
pub type Row = Vec<Rgb>;

/// Rows of a whole source file, one per line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Accumulates tokens into a [`Grid`], one forward pass.
///
/// The current row stays open across token boundaries and is only closed by
/// newlines or by [`GridBuilder::finish`].
pub struct GridBuilder<'t> {
    colors: &'t ColorTable,
    resolved: HashMap<TokenType, Rgb>,
    rows: Vec<Row>,
    current: Row,
}

impl<'t> GridBuilder<'t> {
    pub fn new(colors: &'t ColorTable) -> Self {
        Self {
            colors,
            resolved: HashMap::new(),
            rows: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn push(&mut self, ty: &TokenType, text: &str) -> Result<()> {
        // Newline-only tokens never need a color.
        if text.bytes().all(|b| b == b'\n') {
            for _ in 0..text.len() {
                self.close_row();
            }
            return Ok(());
        }

        let color = self.resolve(ty)?;
        let mut segments = text.split('\n');
        if let Some(head) = segments.next() {
            self.paint(head, color);
        }
        for segment in segments {
            self.close_row();
            self.paint(segment, color);
        }
        Ok(())
    }

    /// Flush the pending row if it holds pixels; fails with
    /// [`CodemapError::EmptyInput`] when no row was produced at all.
    pub fn finish(mut self) -> Result<Grid> {
        if !self.current.is_empty() {
            self.close_row();
        }
        if self.rows.is_empty() {
            return Err(CodemapError::EmptyInput);
        }
        Ok(Grid { rows: self.rows })
    }

    fn resolve(&mut self, ty: &TokenType) -> Result<Rgb> {
        if let Some(color) = self.resolved.get(ty) {
            return Ok(*color);
        }
        let color = self.colors.resolve(ty)?;
        self.resolved.insert(ty.clone(), color);
        Ok(color)
    }

    fn paint(&mut self, text: &str, color: Rgb) {
        let background = self.colors.background();
        self.current.extend(text.chars().map(|ch| {
            if ch.is_whitespace() {
                background
            } else {
                color
            }
        }));
    }

    fn close_row(&mut self) {
        self.rows.push(std::mem::take(&mut self.current));
    }
}
