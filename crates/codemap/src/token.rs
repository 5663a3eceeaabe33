use std::{borrow::Borrow, borrow::Cow, fmt};

/// Classification of a token, e.g. `comment.line.double-slash`.
///
/// Types form a hierarchy through their dotted path: the parent of
/// `keyword.control` is `keyword`, whose parent is [`TokenType::ROOT`].
/// The root is the empty path and has no parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TokenType(Cow<'static, str>);

impl TokenType {
    pub const ROOT: TokenType = TokenType(Cow::Borrowed(""));

    pub const fn from_static(path: &'static str) -> Self {
        TokenType(Cow::Borrowed(path))
    }

    pub fn new(path: impl Into<String>) -> Self {
        TokenType(Cow::Owned(path.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn parent(&self) -> Option<TokenType> {
        if self.is_root() {
            return None;
        }
        Some(match &self.0 {
            Cow::Borrowed(path) => TokenType(Cow::Borrowed(parent_path(path))),
            Cow::Owned(path) => TokenType::new(parent_path(path)),
        })
    }

    /// This type followed by each of its ancestors, ending with the root.
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage {
            next: Some(self.as_str()),
        }
    }

    pub fn is_subtype_of(&self, other: &TokenType) -> bool {
        self.lineage().any(|path| path == other.as_str())
    }
}

fn parent_path(path: &str) -> &str {
    match path.rfind('.') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Iterator over the paths of a type and its ancestors.
///
/// Every step yields a strictly shorter prefix, so the walk always reaches the
/// root and stops there.
#[derive(Clone, Debug)]
pub struct Lineage<'a> {
    next: Option<&'a str>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current.is_empty() {
            None
        } else {
            Some(parent_path(current))
        };
        Some(current)
    }
}

impl Default for TokenType {
    fn default() -> Self {
        TokenType::ROOT
    }
}

impl Borrow<str> for TokenType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TokenType {
    fn from(path: &'static str) -> Self {
        TokenType::from_static(path)
    }
}

impl From<String> for TokenType {
    fn from(path: String) -> Self {
        TokenType::new(path)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}
