use thiserror::Error;

use crate::TokenType;

#[derive(Debug, Error)]
pub enum CodemapError {
    #[error("malformed color {0:?}: expected 6 hex digits with an optional leading '#'")]
    MalformedColor(String),
    #[error("style {0:?} has no background color")]
    MissingBackground(String),
    #[error("nothing to render")]
    EmptyInput,
    #[error("token type {0} has no color and no colored ancestor")]
    UnresolvedTokenType(TokenType),
    #[error("unknown style: {0}")]
    UnknownStyle(String),
    #[error("image of {width}x{height} pixels is too large to encode")]
    ImageTooLarge { width: usize, height: usize },
    #[error("lexer error: {0}")]
    Lex(String),
    #[cfg(feature = "png")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodemapError>;
