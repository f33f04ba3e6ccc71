// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text payloads. Shaping and font loading happen outside this crate.

use alloc::string::String;
use alloc::vec::Vec;

use crate::geometry::Point;

/// Horizontal alignment of text relative to its anchor point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Anchor at the start of the text.
    #[default]
    Left,
    /// Anchor at the middle of the text.
    Center,
    /// Anchor at the end of the text.
    Right,
}

/// Encoding of the text bytes handed to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8 code units.
    #[default]
    Utf8,
    /// UTF-16 code units.
    Utf16,
    /// UTF-32 code points.
    Utf32,
    /// Pre-shaped glyph ids.
    GlyphId,
}

/// Font slant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontSlant {
    /// Upright.
    #[default]
    Upright,
    /// Italic.
    Italic,
    /// Oblique.
    Oblique,
}

/// Description of the font a paint should use for text.
///
/// This is a request, not a loaded font: players resolve it against their
/// own font database.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Typeface {
    /// Family name, e.g. `"Noto Sans"`.
    pub family: String,
    /// Weight on the CSS scale (100 to 1000, normal is 400).
    pub weight: u16,
    /// Width class (1 to 9, normal is 5).
    pub width: u8,
    /// Slant.
    pub slant: FontSlant,
}

impl Typeface {
    /// A normal-weight, normal-width, upright typeface of the given family.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weight: 400,
            width: 5,
            slant: FontSlant::Upright,
        }
    }
}

/// Positioned text: a string plus one position per glyph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextBlob {
    /// Text to draw.
    pub text: String,
    /// Glyph origins, relative to the draw position.
    pub points: Vec<Point>,
}

impl TextBlob {
    /// Create a blob with explicit glyph positions.
    pub fn positioned(text: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            text: text.into(),
            points,
        }
    }
}
