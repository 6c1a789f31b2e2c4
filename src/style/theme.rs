//! Theme-token resolution.
//!
//! Theme definition is out of scope; this module only resolves an abstract
//! token identifier into a renderable CSS variable reference, so generated
//! rules can follow theme changes without being re-rendered.

use serde::Serialize;

/// An abstract theme token, e.g. `editor.selectionBackground`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ThemeToken(String);

impl ThemeToken {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Maps a theme token to the CSS value it renders as.
pub trait ThemeResolver {
    fn css_value(&self, token: &ThemeToken) -> String;
}

/// Resolves tokens to `var(--<prefix>-<id>)` references, with dots in the
/// token id flattened to dashes.
#[derive(Debug, Clone)]
pub struct CssVariableResolver {
    prefix: String,
}

impl CssVariableResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for CssVariableResolver {
    fn default() -> Self {
        Self::new("theme")
    }
}

impl ThemeResolver for CssVariableResolver {
    fn css_value(&self, token: &ThemeToken) -> String {
        format!("var(--{}-{})", self.prefix, token.id().replace('.', "-"))
    }
}
