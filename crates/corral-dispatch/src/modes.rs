//! Native-runner mode selection.

use std::fmt;

/// Ordered, duplicate-preserving collection of native test modes.
///
/// Each token renders as a `--<token>` flag for the native runner. An empty
/// collection means no restriction: the runner applies its own default
/// selection. Tokens pass through opaquely; whether a mode actually exists
/// is the runner's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeSet {
    tokens: Vec<String>,
}

impl ModeSet {
    /// Build a mode set from invocation tokens, order preserved.
    #[must_use]
    pub fn from_tokens(tokens: &[String]) -> Self {
        Self {
            tokens: tokens.to_vec(),
        }
    }

    /// Whether any modes were requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The raw tokens in invocation order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Render the tokens as runner flags, one `--<token>` per token.
    #[must_use]
    pub fn flags(&self) -> Vec<String> {
        self.tokens.iter().map(|token| format!("--{token}")).collect()
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tokens.is_empty() {
            f.write_str("(default)")
        } else {
            f.write_str(&self.tokens.join(" "))
        }
    }
}
