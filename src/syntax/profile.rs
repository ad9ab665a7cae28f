//! `SyntaxProfile` and `SyntaxTable`: per-language highlighting rules.

use bitflags::bitflags;
use std::path::Path;

bitflags! {
    /// Optional highlight categories a profile enables.
    ///
    /// Comments and keywords are always active when configured; numbers
    /// and strings are opt-in per language.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct HighlightFlags: u8 {
        /// Numeric literals.
        const NUMBERS = 0b0000_0001;
        /// Single and double quoted strings.
        const STRINGS = 0b0000_0010;
    }
}

/// Highlighting rules for one language.
///
/// Profiles are immutable once built. Construct one with
/// [`SyntaxProfile::new`] and the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxProfile {
    name: String,
    file_matches: Vec<String>,
    single_line_comment: Option<String>,
    multi_line_comment: Option<(String, String)>,
    keywords1: Vec<String>,
    keywords2: Vec<String>,
    flags: HighlightFlags,
}

impl SyntaxProfile {
    /// Create a profile with a display name and no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_matches: Vec::new(),
            single_line_comment: None,
            multi_line_comment: None,
            keywords1: Vec::new(),
            keywords2: Vec::new(),
            flags: HighlightFlags::empty(),
        }
    }

    /// Set the filename patterns.
    ///
    /// A pattern starting with `.` matches a file extension, any other
    /// pattern must equal the whole file name.
    #[must_use]
    pub fn with_file_matches<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_matches = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the single-line comment marker. Empty markers are ignored.
    #[must_use]
    pub fn with_single_line_comment(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        self.single_line_comment = (!marker.is_empty()).then_some(marker);
        self
    }

    /// Set the multi-line comment delimiters. Both must be non-empty.
    #[must_use]
    pub fn with_multi_line_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        let (start, end) = (start.into(), end.into());
        self.multi_line_comment = (!start.is_empty() && !end.is_empty()).then_some((start, end));
        self
    }

    /// Set the primary keyword class (statements, declarations).
    #[must_use]
    pub fn with_keywords1<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords1 = keywords.into_iter().map(Into::into).filter(|k: &String| !k.is_empty()).collect();
        self
    }

    /// Set the secondary keyword class (types).
    #[must_use]
    pub fn with_keywords2<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords2 = keywords.into_iter().map(Into::into).filter(|k: &String| !k.is_empty()).collect();
        self
    }

    /// Set the enabled highlight categories.
    #[must_use]
    pub fn with_flags(mut self, flags: HighlightFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Display name shown in the status bar.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filename patterns.
    pub fn file_matches(&self) -> &[String] {
        &self.file_matches
    }

    /// Single-line comment marker, if any.
    pub fn single_line_comment(&self) -> Option<&str> {
        self.single_line_comment.as_deref()
    }

    /// Multi-line comment start and end markers, if any.
    pub fn multi_line_comment(&self) -> Option<(&str, &str)> {
        self.multi_line_comment.as_ref().map(|(s, e)| (s.as_str(), e.as_str()))
    }

    /// Primary keywords.
    pub fn keywords1(&self) -> &[String] {
        &self.keywords1
    }

    /// Secondary keywords.
    pub fn keywords2(&self) -> &[String] {
        &self.keywords2
    }

    /// Enabled categories.
    pub const fn flags(&self) -> HighlightFlags {
        self.flags
    }

    /// Check whether this profile applies to `file_name`.
    pub fn matches(&self, file_name: &str) -> bool {
        let extension = file_name.rfind('.').map(|dot| &file_name[dot..]);
        self.file_matches.iter().any(|pattern| {
            if pattern.starts_with('.') {
                extension == Some(pattern.as_str())
            } else {
                file_name == pattern
            }
        })
    }
}

/// Ordered list of profiles. The first matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTable {
    entries: Vec<SyntaxProfile>,
}

impl SyntaxTable {
    /// Create a table from an ordered list of profiles.
    pub const fn new(entries: Vec<SyntaxProfile>) -> Self {
        Self { entries }
    }

    /// The table shipped with the editor.
    pub fn builtin() -> Self {
        super::database::builtin()
    }

    /// The profiles, in lookup order.
    pub fn entries(&self) -> &[SyntaxProfile] {
        &self.entries
    }

    /// Find the profile for a path, matching on its final component.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Option<&SyntaxProfile> {
        let path = path.as_ref();
        let file_name = path.file_name()?.to_str()?;
        let found = self.entries.iter().find(|entry| entry.matches(file_name));
        tracing::debug!(
            target: "syntax",
            file = %path.display(),
            syntax = found.map(SyntaxProfile::name),
            "syntax_resolved"
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SyntaxTable {
        SyntaxTable::new(vec![
            SyntaxProfile::new("C").with_file_matches([".c", ".h"]),
            SyntaxProfile::new("Make").with_file_matches(["Makefile"]),
            SyntaxProfile::new("Also C").with_file_matches([".c"]),
        ])
    }

    #[test]
    fn test_resolve_by_extension() {
        let table = table();
        assert_eq!(table.resolve("src/main.c").map(SyntaxProfile::name), Some("C"));
        assert_eq!(table.resolve("x.h").map(SyntaxProfile::name), Some("C"));
    }

    #[test]
    fn test_resolve_first_match_wins() {
        assert_eq!(table().resolve("a.c").map(SyntaxProfile::name), Some("C"));
    }

    #[test]
    fn test_resolve_exact_name() {
        let table = table();
        assert_eq!(table.resolve("build/Makefile").map(SyntaxProfile::name), Some("Make"));
        assert!(table.resolve("Makefile.bak").is_none());
    }

    #[test]
    fn test_resolve_uses_last_extension() {
        let table = table();
        assert!(table.resolve("archive.c.gz").is_none());
        assert!(table.resolve("noext").is_none());
    }

    #[test]
    fn test_empty_markers_are_ignored() {
        let profile = SyntaxProfile::new("x")
            .with_single_line_comment("")
            .with_multi_line_comment("/*", "");
        assert!(profile.single_line_comment().is_none());
        assert!(profile.multi_line_comment().is_none());
    }
}
