//! Colors and the highlight palette.

use crate::syntax::Highlight;

/// A true-color RGB value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Foreground color per highlight tag.
///
/// [`Highlight::Normal`] always uses the terminal's default foreground.
/// Both comment tags share one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Comments, single- and multi-line.
    pub comment: Rgb,
    /// Class-1 keywords.
    pub keyword1: Rgb,
    /// Class-2 keywords.
    pub keyword2: Rgb,
    /// String literals.
    pub string: Rgb,
    /// Numeric literals.
    pub number: Rgb,
    /// Search matches.
    pub matched: Rgb,
}

impl Palette {
    /// Foreground for `tag`, or `None` for the default.
    pub const fn color(&self, tag: Highlight) -> Option<Rgb> {
        match tag {
            Highlight::Normal => None,
            Highlight::Comment | Highlight::MultiLineComment => Some(self.comment),
            Highlight::Keyword1 => Some(self.keyword1),
            Highlight::Keyword2 => Some(self.keyword2),
            Highlight::String => Some(self.string),
            Highlight::Number => Some(self.number),
            Highlight::Match => Some(self.matched),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            comment: Rgb::from_u32(0x0000_CDCD),
            keyword1: Rgb::from_u32(0x00CD_CD00),
            keyword2: Rgb::from_u32(0x0000_CD00),
            string: Rgb::from_u32(0x00CD_00CD),
            number: Rgb::from_u32(0x00CD_0000),
            matched: Rgb::from_u32(0x0000_00EE),
        }
    }
}
