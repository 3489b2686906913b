//! Tofu probe
//!
//! Glyph rendering delegates to whatever font the host has, so an emoji the
//! font lacks comes out as a placeholder box or as nothing. These checks
//! only report that; they never change what gets written.

use ab_glyph::Font;
use image::RgbaImage;

/// What the loaded font can do with a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSupport {
    Supported,
    /// The font maps this character to the missing-glyph slot
    MissingGlyph(char),
    /// Glyphs exist but have no vector outline (bitmap-only color emoji)
    NoOutline,
}

/// Variation selectors, joiners and skin tone modifiers never render alone
pub fn is_presentation_modifier(c: char) -> bool {
    matches!(c, '\u{FE0E}' | '\u{FE0F}' | '\u{200D}' | '\u{1F3FB}'..='\u{1F3FF}')
}

pub fn probe_glyph<F: Font>(font: &F, symbol: &str) -> GlyphSupport {
    let mut any_outline = false;
    for c in symbol.chars().filter(|c| !is_presentation_modifier(*c)) {
        let id = font.glyph_id(c);
        if id.0 == 0 {
            return GlyphSupport::MissingGlyph(c);
        }
        any_outline |= font.outline(id).is_some();
    }

    if any_outline {
        GlyphSupport::Supported
    } else {
        GlyphSupport::NoOutline
    }
}

/// Fraction of pixels with any alpha
pub fn ink_coverage(img: &RgbaImage) -> f32 {
    let total = (img.width() as u64) * (img.height() as u64);
    if total == 0 {
        return 0.0;
    }
    let inked = img.pixels().filter(|p| p[3] > 0).count() as u64;
    inked as f32 / total as f32
}
