//! Lexing through syntect's bundled grammars.
//!
//! Tokens are typed by the innermost scope at their position, so a keyword in a
//! Rust file becomes `keyword.control.rust` and resolves through `keyword.control`
//! and `keyword` before falling back to the root.

use std::{collections::VecDeque, path::Path};

use once_cell::sync::Lazy;
use syntect::{
    parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

use crate::{
    error::{CodemapError, Result},
    TokenType,
};

static DEFAULT_SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// A grammar selected for one file.
#[derive(Clone, Copy)]
pub struct Lexer<'s> {
    syntaxes: &'s SyntaxSet,
    syntax: &'s SyntaxReference,
}

impl Lexer<'static> {
    /// Pick a grammar from the bundled set by file name, extension, then the
    /// first line of `text` (shebangs, modelines).
    pub fn detect(path: &Path, text: &str) -> Option<Self> {
        Self::detect_in(&DEFAULT_SYNTAXES, path, text)
    }

    /// Like [`Lexer::detect`] without looking at the contents.
    pub fn for_path(path: &Path) -> Option<Self> {
        Self::detect_in(&DEFAULT_SYNTAXES, path, "")
    }
}

impl<'s> Lexer<'s> {
    pub fn detect_in(syntaxes: &'s SyntaxSet, path: &Path, text: &str) -> Option<Self> {
        let by_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| syntaxes.find_syntax_by_extension(name));
        let by_extension = || {
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| syntaxes.find_syntax_by_extension(ext))
        };
        let by_first_line = || {
            text.lines()
                .next()
                .and_then(|line| syntaxes.find_syntax_by_first_line(line))
        };
        let syntax = by_name.or_else(by_extension).or_else(by_first_line)?;
        tracing::trace!(path = %path.display(), syntax = %syntax.name, "selected lexer");
        Some(Self { syntaxes, syntax })
    }

    pub fn name(&self) -> &'s str {
        &self.syntax.name
    }

    /// Lazily split `text` into typed tokens. Concatenating the token texts
    /// gives back `text`.
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokens<'s, 'a> {
        Tokens {
            syntaxes: self.syntaxes,
            state: ParseState::new(self.syntax),
            stack: ScopeStack::new(),
            lines: LinesWithEndings::from(text),
            pending: VecDeque::new(),
            failed: false,
        }
    }
}

/// Token stream of one text, parsed a line at a time.
pub struct Tokens<'s, 'a> {
    syntaxes: &'s SyntaxSet,
    state: ParseState,
    stack: ScopeStack,
    lines: LinesWithEndings<'a>,
    pending: VecDeque<(TokenType, &'a str)>,
    failed: bool,
}

impl<'s, 'a> Tokens<'s, 'a> {
    fn lex_line(&mut self, line: &'a str) -> Result<()> {
        let ops = self
            .state
            .parse_line(line, self.syntaxes)
            .map_err(|err| CodemapError::Lex(err.to_string()))?;

        let mut last = 0;
        for (offset, op) in &ops {
            let offset = (*offset).clamp(last, line.len());
            if offset > last {
                self.emit(&line[last..offset]);
                last = offset;
            }
            self.stack
                .apply(op)
                .map_err(|err| CodemapError::Lex(err.to_string()))?;
        }
        if last < line.len() {
            self.emit(&line[last..]);
        }
        Ok(())
    }

    fn emit(&mut self, text: &'a str) {
        let ty = match self.stack.as_slice().last() {
            Some(scope) => TokenType::new(scope.build_string()),
            None => TokenType::ROOT,
        };
        self.pending.push_back((ty, text));
    }
}

impl<'s, 'a> Iterator for Tokens<'s, 'a> {
    type Item = Result<(TokenType, &'a str)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.failed {
                return None;
            }
            let line = self.lines.next()?;
            if let Err(err) = self.lex_line(line) {
                self.failed = true;
                return Some(Err(err));
            }
        }
    }
}
