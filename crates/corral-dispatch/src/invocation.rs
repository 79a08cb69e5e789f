//! Invocation tokens and strategy selection.
//!
//! The first token of an invocation may name a strategy. Matching is exact
//! and case-sensitive: anything else, including a typo like `Unit` or
//! `units`, falls through to the native default with every token treated as
//! a mode token.

use std::fmt;

/// Execution strategies.
///
/// A closed set with [`Strategy::Native`] as the designated default, so an
/// unrecognized first token can never fail selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Print the native runner's usage and exit non-zero.
    Help,
    /// Unit tests only, no cluster.
    Unit,
    /// Matrix runner with verbatim pass-through arguments.
    Matrix,
    /// Unit tests first, then the native strategy.
    Combined,
    /// Native integration runner against the provisioned cluster.
    Native,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Help => "help",
            Self::Unit => "unit",
            Self::Matrix => "matrix",
            Self::Combined => "combined",
            Self::Native => "native",
        };
        f.write_str(name)
    }
}

/// The ordered argument list supplied at process start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    tokens: Vec<String>,
}

impl Invocation {
    /// Build an invocation from raw argument tokens.
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// All tokens in invocation order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Select the strategy and the tokens left over for it.
    ///
    /// Keyword strategies consume the leading token. The native default
    /// consumes nothing: every token, including the first, is a mode token.
    #[must_use]
    pub fn select(&self) -> (Strategy, &[String]) {
        match self.tokens.first().map(String::as_str) {
            Some("help") => (Strategy::Help, &self.tokens[1..]),
            Some("unit") => (Strategy::Unit, &self.tokens[1..]),
            Some("tox") => (Strategy::Matrix, &self.tokens[1..]),
            Some("all") => (Strategy::Combined, &self.tokens[1..]),
            _ => (Strategy::Native, self.tokens.as_slice()),
        }
    }
}
