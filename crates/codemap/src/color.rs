use std::{collections::HashMap, fmt, str::FromStr};

use crate::{
    error::{CodemapError, Result},
    Style, TokenType,
};

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(color: &str) -> Result<Self> {
        let digits = color.strip_prefix('#').unwrap_or(color);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodemapError::MalformedColor(color.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| CodemapError::MalformedColor(color.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Rgb {
    type Err = CodemapError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Token type to color mapping plus the background color.
///
/// Built once per run and only read afterwards, so one table can be shared by
/// every file being rendered, across threads.
#[derive(Clone, Debug)]
pub struct ColorTable {
    background: Rgb,
    colors: HashMap<TokenType, Rgb>,
}

impl ColorTable {
    /// An empty table. Without a root entry, types outside the inserted
    /// hierarchies fail to resolve.
    pub fn new(background: Rgb) -> Self {
        Self {
            background,
            colors: HashMap::new(),
        }
    }

    /// Build the table for a style.
    ///
    /// The root type maps to the style's foreground, entries without a color map to
    /// black, and the background must be present.
    pub fn from_style(style: &Style) -> Result<Self> {
        let background = style
            .background
            .as_deref()
            .ok_or_else(|| CodemapError::MissingBackground(style.name.clone()))
            .and_then(Rgb::from_hex)?;
        let mut table = Self::new(background);

        let foreground = match style.foreground.as_deref() {
            Some(hex) => Rgb::from_hex(hex)?,
            None => Rgb::BLACK,
        };
        table.insert(TokenType::ROOT, foreground);

        for (ty, token_style) in &style.tokens {
            let color = match token_style.color.as_deref() {
                Some(hex) => Rgb::from_hex(hex)?,
                None => Rgb::BLACK,
            };
            table.insert(ty.clone(), color);
        }
        tracing::debug!(style = %style.name, entries = table.len(), "built color table");
        Ok(table)
    }

    pub fn with_color(mut self, ty: impl Into<TokenType>, color: Rgb) -> Self {
        self.insert(ty.into(), color);
        self
    }

    pub fn insert(&mut self, ty: TokenType, color: Rgb) {
        self.colors.insert(ty, color);
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Color mapped directly to `ty`, ignoring ancestors.
    pub fn get(&self, ty: &TokenType) -> Option<Rgb> {
        self.colors.get(ty.as_str()).copied()
    }

    /// Color of the nearest mapped type in `ty`'s lineage.
    pub fn resolve(&self, ty: &TokenType) -> Result<Rgb> {
        ty.lineage()
            .find_map(|path| self.colors.get(path).copied())
            .ok_or_else(|| CodemapError::UnresolvedTokenType(ty.clone()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
