//! Tokenizer configuration.
//!
//! [`Options`] is built with `Options::default()` plus the `with_*`
//! builders and checked once with [`Options::validate`] before a state is
//! created from it.

use bitflags::bitflags;

use crate::error::StateError;

/// Whether the input is a classic script or an ES module.
///
/// Modules are strict by default and never recognize HTML-style comments.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

bitflags! {
    /// Optional syntax extensions recognized by the token reader.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Plugins: u8 {
        /// `1_000_000`, `0xFF_FF`.
        const NUMERIC_SEPARATOR = 1 << 0;
        /// `#name` private class members.
        const CLASS_PRIVATE = 1 << 1;
    }
}

/// Configuration for one parse.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    pub source_type: SourceType,
    /// Attached to every token location when set.
    pub source_filename: Option<String>,
    /// Line number of the first line, for snippets embedded in a larger file.
    pub start_line: u32,
    /// Overrides the strictness implied by `source_type`.
    pub strict_mode: Option<bool>,
    /// Record every token and comment in `TokenizerState::tokens`.
    pub tokens: bool,
    pub plugins: Plugins,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            source_type: SourceType::Script,
            source_filename: None,
            start_line: 1,
            strict_mode: None,
            tokens: false,
            plugins: Plugins::empty(),
        }
    }
}

impl Options {
    #[must_use]
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    #[must_use]
    pub fn with_source_filename(mut self, filename: impl Into<String>) -> Self {
        self.source_filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_start_line(mut self, start_line: u32) -> Self {
        self.start_line = start_line;
        self
    }

    #[must_use]
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = Some(strict);
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: bool) -> Self {
        self.tokens = tokens;
        self
    }

    #[must_use]
    pub fn with_plugins(mut self, plugins: Plugins) -> Self {
        self.plugins |= plugins;
        self
    }

    /// Strictness of the top level: the explicit override if given,
    /// otherwise strict exactly for modules.
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict_mode
            .unwrap_or(self.source_type == SourceType::Module)
    }

    #[inline]
    pub fn has_plugin(&self, plugin: Plugins) -> bool {
        self.plugins.contains(plugin)
    }

    /// Reject configurations a state cannot start from.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.start_line == 0 {
            return Err(StateError::InvalidStartLine(self.start_line));
        }
        Ok(())
    }
}
