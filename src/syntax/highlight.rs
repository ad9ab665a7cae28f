//! Highlighter: single left-to-right scan over a row's render form.
//!
//! The scan is stateful across rows through one bit: whether the previous
//! row ended inside an unterminated multi-line comment. The scanner takes
//! that bit in and hands the new value back; propagating it down the buffer
//! is [`LineBuffer`](crate::buffer::LineBuffer)'s job.

use super::profile::{HighlightFlags, SyntaxProfile};

/// Classification of a single render character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    /// Plain text.
    #[default]
    Normal,
    /// Single-line comment, to end of row.
    Comment,
    /// Inside a (possibly multi-row) block comment, delimiters included.
    MultiLineComment,
    /// String literal, quotes included.
    String,
    /// Numeric literal.
    Number,
    /// Primary keyword.
    Keyword1,
    /// Secondary keyword.
    Keyword2,
    /// Transient search match.
    Match,
}

/// Token delimiter test used for keyword and number boundaries.
pub fn is_separator(c: char) -> bool {
    c == '\0' || c.is_whitespace() || ",.()+-/*=~%<>[];".contains(c)
}

/// Check whether `pattern` occurs in `text` starting at `at`.
fn starts_with_at(text: &[char], at: usize, pattern: &str) -> bool {
    let mut pos = at;
    for expected in pattern.chars() {
        match text.get(pos) {
            Some(&c) if c == expected => pos += 1,
            _ => return false,
        }
    }
    pos > at
}

/// Tag `len` cells starting at `start`, clamped to the row.
fn fill(highlight: &mut [Highlight], start: usize, len: usize, tag: Highlight) {
    let end = start.saturating_add(len).min(highlight.len());
    if start < end {
        highlight[start..end].fill(tag);
    }
}

/// Stateless scanner bound to one syntax profile.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'a> {
    syntax: &'a SyntaxProfile,
}

impl<'a> Highlighter<'a> {
    /// Create a highlighter for the given profile.
    pub const fn new(syntax: &'a SyntaxProfile) -> Self {
        Self { syntax }
    }

    /// Tag `render` into `highlight`.
    ///
    /// `highlight` must have the same length as `render` and is expected to
    /// start out all [`Highlight::Normal`]. `in_comment` is the previous
    /// row's open-comment flag. Returns whether this row ends inside an
    /// open multi-line comment.
    pub fn scan(&self, render: &[char], highlight: &mut [Highlight], mut in_comment: bool) -> bool {
        debug_assert_eq!(render.len(), highlight.len());

        let syntax = self.syntax;
        let single = syntax.single_line_comment();
        let multi = syntax.multi_line_comment();
        let flags = syntax.flags();

        let mut prev_sep = true;
        let mut in_string: Option<char> = None;
        let mut i = 0;

        while i < render.len() {
            let c = render[i];
            let prev_hl = if i > 0 { highlight[i - 1] } else { Highlight::Normal };

            if let Some(marker) = single {
                if in_string.is_none() && !in_comment && starts_with_at(render, i, marker) {
                    fill(highlight, i, render.len() - i, Highlight::Comment);
                    break;
                }
            }

            if let Some((start, end)) = multi {
                if in_string.is_none() {
                    if in_comment {
                        highlight[i] = Highlight::MultiLineComment;
                        if starts_with_at(render, i, end) {
                            let len = end.chars().count();
                            fill(highlight, i, len, Highlight::MultiLineComment);
                            i += len;
                            in_comment = false;
                            prev_sep = true;
                        } else {
                            i += 1;
                        }
                        continue;
                    }
                    if starts_with_at(render, i, start) {
                        let len = start.chars().count();
                        fill(highlight, i, len, Highlight::MultiLineComment);
                        i += len;
                        in_comment = true;
                        prev_sep = false;
                        continue;
                    }
                }
            }

            if flags.contains(HighlightFlags::STRINGS) {
                if let Some(quote) = in_string {
                    highlight[i] = Highlight::String;
                    if c == '\\' && i + 1 < render.len() {
                        highlight[i + 1] = Highlight::String;
                        i += 2;
                        prev_sep = true;
                        continue;
                    }
                    if c == quote {
                        in_string = None;
                    }
                    prev_sep = true;
                    i += 1;
                    continue;
                }
                if c == '"' || c == '\'' {
                    in_string = Some(c);
                    highlight[i] = Highlight::String;
                    i += 1;
                    continue;
                }
            }

            if flags.contains(HighlightFlags::NUMBERS)
                && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                    || (c == '.' && prev_hl == Highlight::Number))
            {
                if i > 0 && matches!(render[i - 1], '-' | '+') {
                    highlight[i - 1] = Highlight::Number;
                }
                highlight[i] = Highlight::Number;
            }

            if prev_sep {
                if let Some(len) = self.match_keyword(render, i, highlight) {
                    i += len;
                    prev_sep = false;
                    continue;
                }
            }

            prev_sep = is_separator(c);
            i += 1;
        }

        in_comment
    }

    /// Try both keyword classes at `at`. Returns the number of cells consumed.
    fn match_keyword(&self, render: &[char], at: usize, highlight: &mut [Highlight]) -> Option<usize> {
        for keyword in self.syntax.keywords1() {
            if !starts_with_at(render, at, keyword) {
                continue;
            }
            let len = keyword.chars().count();
            if render.get(at + len).map_or(true, |&next| is_separator(next)) {
                fill(highlight, at, len, Highlight::Keyword1);
                return Some(len);
            }
        }

        for keyword in self.syntax.keywords2() {
            if !starts_with_at(render, at, keyword) {
                continue;
            }
            let mut len = keyword.chars().count();
            match render.get(at + len) {
                None => {}
                Some('?') => len += 1,
                Some(&next) if is_separator(next) => {}
                Some(_) => continue,
            }
            fill(highlight, at, len, Highlight::Keyword2);
            return Some(len);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_like() -> SyntaxProfile {
        SyntaxProfile::new("C")
            .with_single_line_comment("//")
            .with_multi_line_comment("/*", "*/")
            .with_keywords1(["if", "return", "while"])
            .with_keywords2(["int", "char"])
            .with_flags(HighlightFlags::NUMBERS | HighlightFlags::STRINGS)
    }

    fn scan(profile: &SyntaxProfile, text: &str, in_comment: bool) -> (Vec<Highlight>, bool) {
        let render: Vec<char> = text.chars().collect();
        let mut highlight = vec![Highlight::Normal; render.len()];
        let open = Highlighter::new(profile).scan(&render, &mut highlight, in_comment);
        (highlight, open)
    }

    #[test]
    fn test_single_line_comment_to_end() {
        let (hl, open) = scan(&c_like(), "x = 1; // note", false);
        assert!(!open);
        assert!(hl[7..].iter().all(|&h| h == Highlight::Comment));
        assert_eq!(hl[4], Highlight::Number);
    }

    #[test]
    fn test_comment_marker_inside_string_is_text() {
        let (hl, _) = scan(&c_like(), "\"a//b\" x", false);
        assert!(hl[..6].iter().all(|&h| h == Highlight::String));
        assert_eq!(hl[7], Highlight::Normal);
    }

    #[test]
    fn test_string_escape_does_not_close() {
        let (hl, _) = scan(&c_like(), r#"'\'' x"#, false);
        assert!(hl[..4].iter().all(|&h| h == Highlight::String));
        assert_eq!(hl[5], Highlight::Normal);
    }

    #[test]
    fn test_block_comment_opens_and_closes() {
        let (hl, open) = scan(&c_like(), "a /* b */ c", false);
        assert!(!open);
        assert_eq!(hl[0], Highlight::Normal);
        assert!(hl[2..9].iter().all(|&h| h == Highlight::MultiLineComment));
        assert_eq!(hl[10], Highlight::Normal);
    }

    #[test]
    fn test_block_comment_left_open() {
        let (hl, open) = scan(&c_like(), "/* start", false);
        assert!(open);
        assert!(hl.iter().all(|&h| h == Highlight::MultiLineComment));
    }

    #[test]
    fn test_seeded_comment_closes_mid_row() {
        let (hl, open) = scan(&c_like(), "end */ return", true);
        assert!(!open);
        assert!(hl[..6].iter().all(|&h| h == Highlight::MultiLineComment));
        assert!(hl[7..].iter().all(|&h| h == Highlight::Keyword1));
    }

    #[test]
    fn test_single_line_marker_ignored_inside_block_comment() {
        let (hl, open) = scan(&c_like(), "// still", true);
        assert!(open);
        assert!(hl.iter().all(|&h| h == Highlight::MultiLineComment));
    }

    #[test]
    fn test_numbers_need_separator_before() {
        let (hl, _) = scan(&c_like(), "x1 12.5 -3", false);
        assert_eq!(hl[1], Highlight::Normal);
        assert!(hl[3..7].iter().all(|&h| h == Highlight::Number));
        assert_eq!(hl[8], Highlight::Number, "sign is absorbed");
        assert_eq!(hl[9], Highlight::Number);
    }

    #[test]
    fn test_keywords_require_boundaries() {
        let (hl, _) = scan(&c_like(), "if iffy (int) char?", false);
        assert_eq!(&hl[..2], &[Highlight::Keyword1; 2]);
        assert!(hl[3..7].iter().all(|&h| h == Highlight::Normal));
        assert!(hl[9..12].iter().all(|&h| h == Highlight::Keyword2));
        assert!(hl[14..19].iter().all(|&h| h == Highlight::Keyword2), "trailing ? is consumed");
    }

    #[test]
    fn test_keyword_not_after_identifier_char() {
        let (hl, _) = scan(&c_like(), "xif", false);
        assert!(hl.iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn test_categories_can_be_disabled() {
        let plain = SyntaxProfile::new("plain").with_single_line_comment("#");
        let (hl, _) = scan(&plain, "\"s\" 42 # c", false);
        assert!(hl[..7].iter().all(|&h| h == Highlight::Normal));
        assert!(hl[7..].iter().all(|&h| h == Highlight::Comment));
    }

    #[test]
    fn test_separator_set() {
        for c in [' ', ',', '.', '(', ')', '+', '-', '/', '*', '=', '~', '%', '<', '>', '[', ']', ';', '\0'] {
            assert!(is_separator(c), "{c:?}");
        }
        assert!(!is_separator('_'));
        assert!(!is_separator('a'));
    }
}
