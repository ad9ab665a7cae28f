//! Syntax module: language profiles and the row highlighter.
//!
//! This module contains:
//! - [`SyntaxProfile`]: comment markers, keyword classes and enabled categories
//! - [`SyntaxTable`]: ordered filename lookup, first match wins
//! - [`Highlighter`]: the per-row scanner producing [`Highlight`] tags
//! - [`database`]: the profiles shipped with the editor

pub mod database;
mod highlight;
mod profile;

pub use highlight::{is_separator, Highlight, Highlighter};
pub use profile::{HighlightFlags, SyntaxProfile, SyntaxTable};
