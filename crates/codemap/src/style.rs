use std::collections::BTreeMap;

use crate::{
    error::{CodemapError, Result},
    TokenType,
};

/// Styling of a single token type. Only the color matters for a codemap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenStyle {
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
}

impl TokenStyle {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
        }
    }
}

/// A color theme: hex colors for the background, the default foreground and any
/// number of token types.
///
/// ```toml
/// name = "paper"
/// background = "#ffffff"
/// foreground = "#202020"
///
/// [tokens]
/// comment = { color = "#8a8a8a" }
/// "string.quoted" = { color = "#a31515" }
/// punctuation = {}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub background: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub foreground: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tokens: BTreeMap<TokenType, TokenStyle>,
}

struct BuiltinStyle {
    name: &'static str,
    background: &'static str,
    foreground: &'static str,
    tokens: &'static [(&'static str, Option<&'static str>)],
}

const BUILTIN_STYLES: &[BuiltinStyle] = &[
    BuiltinStyle {
        name: "default",
        background: "#f8f8f8",
        foreground: "#000000",
        tokens: &[
            ("comment", Some("#3d7b7b")),
            ("keyword", Some("#008000")),
            ("keyword.operator", Some("#666666")),
            ("storage", Some("#008000")),
            ("storage.type", Some("#b00040")),
            ("string", Some("#ba2121")),
            ("constant.numeric", Some("#666666")),
            ("constant.language", Some("#008000")),
            ("constant.character.escape", Some("#aa5d1f")),
            ("entity.name.function", Some("#0000ff")),
            ("entity.name.type", Some("#0000ff")),
            ("entity.name.class", Some("#0000ff")),
            ("entity.name.tag", Some("#008000")),
            ("entity.other.attribute-name", Some("#687822")),
            ("support.function", Some("#008000")),
            ("meta.preprocessor", Some("#9c6500")),
            ("variable", None),
            ("punctuation", None),
        ],
    },
    BuiltinStyle {
        name: "monokai",
        background: "#272822",
        foreground: "#f8f8f2",
        tokens: &[
            ("comment", Some("#75715e")),
            ("keyword", Some("#f92672")),
            ("keyword.operator", Some("#f92672")),
            ("storage", Some("#66d9ef")),
            ("storage.type", Some("#66d9ef")),
            ("string", Some("#e6db74")),
            ("constant.numeric", Some("#ae81ff")),
            ("constant.language", Some("#ae81ff")),
            ("constant.character.escape", Some("#ae81ff")),
            ("entity.name.function", Some("#a6e22e")),
            ("entity.name.type", Some("#a6e22e")),
            ("entity.name.class", Some("#a6e22e")),
            ("entity.name.tag", Some("#f92672")),
            ("entity.other.attribute-name", Some("#a6e22e")),
            ("support.function", Some("#66d9ef")),
            ("variable", Some("#f8f8f2")),
            ("punctuation", Some("#f8f8f2")),
        ],
    },
    BuiltinStyle {
        name: "solarized-dark",
        background: "#002b36",
        foreground: "#839496",
        tokens: &[
            ("comment", Some("#586e75")),
            ("keyword", Some("#859900")),
            ("keyword.operator", Some("#859900")),
            ("storage", Some("#859900")),
            ("storage.type", Some("#b58900")),
            ("string", Some("#2aa198")),
            ("constant.numeric", Some("#2aa198")),
            ("constant.language", Some("#b58900")),
            ("constant.character.escape", Some("#cb4b16")),
            ("entity.name.function", Some("#268bd2")),
            ("entity.name.type", Some("#b58900")),
            ("entity.name.class", Some("#b58900")),
            ("entity.name.tag", Some("#268bd2")),
            ("entity.other.attribute-name", Some("#93a1a1")),
            ("support.function", Some("#268bd2")),
            ("variable", Some("#268bd2")),
            ("punctuation", Some("#839496")),
        ],
    },
];

impl Style {
    pub fn new(name: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Some(background.into()),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, ty: impl Into<TokenType>, style: TokenStyle) -> Self {
        self.tokens.insert(ty.into(), style);
        self
    }

    pub fn builtin(name: &str) -> Option<Style> {
        BUILTIN_STYLES
            .iter()
            .find(|style| style.name.eq_ignore_ascii_case(name))
            .map(|builtin| Style {
                name: builtin.name.to_string(),
                background: Some(builtin.background.to_string()),
                foreground: Some(builtin.foreground.to_string()),
                tokens: builtin
                    .tokens
                    .iter()
                    .map(|&(path, color)| {
                        let style = TokenStyle {
                            color: color.map(str::to_string),
                        };
                        (TokenType::from_static(path), style)
                    })
                    .collect(),
            })
    }

    /// Like [`Style::builtin`], failing with [`CodemapError::UnknownStyle`].
    pub fn by_name(name: &str) -> Result<Style> {
        Self::builtin(name).ok_or_else(|| CodemapError::UnknownStyle(name.to_string()))
    }

    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_STYLES.iter().map(|style| style.name)
    }
}
