//! Dynamically generated style rules.
//!
//! ## Modules
//!
//! - `rules` - the content-addressed, reference-counted rule cache
//! - `theme` - theme-token resolution to CSS variable references

pub mod rules;
pub mod theme;

pub use rules::{ClassNameLease, CssProperties, CssValue, DynamicRuleCache, canonical_key};
pub use theme::{CssVariableResolver, ThemeResolver, ThemeToken};
