//! Emoji glyph rasterizer
//!
//! Renders a single symbol centred on a square canvas using the first usable
//! font from an ordered list of system paths. The font is loaded for each
//! call and dropped afterwards.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::*;
use crate::error::RenderError;
use crate::render::probe::{GlyphSupport, ink_coverage, probe_glyph};

/// Anything that can turn a symbol into a bitmap.
///
/// The batch driver only talks to this trait, so the font-backed rasterizer
/// can be swapped out.
pub trait GlyphRasterizer: Sync {
    fn render_glyph_on(
        &self,
        symbol: &str,
        canvas_size: u32,
        foreground: Rgba<u8>,
        background: Rgba<u8>,
    ) -> Result<RgbaImage, RenderError>;

    fn render_glyph(
        &self,
        symbol: &str,
        canvas_size: u32,
        foreground: Rgba<u8>,
    ) -> Result<RgbaImage, RenderError> {
        self.render_glyph_on(symbol, canvas_size, foreground, TRANSPARENT)
    }
}

/// Font-backed glyph rasterizer
#[derive(Debug, Clone)]
pub struct SymbolRasterizer {
    /// Emoji-capable fonts, first existing one wins
    pub candidates: Vec<PathBuf>,
    /// Baseline fonts tried when no candidate loads
    pub fallbacks: Vec<PathBuf>,
    /// Em size as a fraction of the canvas
    pub glyph_scale: f32,
}

impl Default for SymbolRasterizer {
    fn default() -> Self {
        Self {
            candidates: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            fallbacks: FALLBACK_FONTS.iter().map(PathBuf::from).collect(),
            glyph_scale: GLYPH_SCALE,
        }
    }
}

impl SymbolRasterizer {
    pub fn new(candidates: Vec<PathBuf>, fallbacks: Vec<PathBuf>, glyph_scale: f32) -> Self {
        Self {
            candidates,
            fallbacks,
            glyph_scale,
        }
    }

    /// First usable font for `symbol`: candidates, then fallbacks.
    ///
    /// A candidate whose glyphs for `symbol` are bitmap-only is skipped, since
    /// only outlines can be rasterized at an arbitrary size. Fallbacks are
    /// accepted as long as they parse.
    pub fn locate_font(&self, symbol: &str) -> Option<(PathBuf, FontVec)> {
        let has_outlines = |font: &FontVec| probe_glyph(font, symbol) != GlyphSupport::NoOutline;
        if let Some(found) = first_loadable(&self.candidates, has_outlines) {
            debug!(path = %found.0.display(), "Using emoji font");
            return Some(found);
        }

        let found = first_loadable(&self.fallbacks, |_| true)?;
        warn!(
            path = %found.0.display(),
            "No system emoji font found, using fallback font"
        );
        Some(found)
    }
}

impl GlyphRasterizer for SymbolRasterizer {
    fn render_glyph_on(
        &self,
        symbol: &str,
        canvas_size: u32,
        foreground: Rgba<u8>,
        background: Rgba<u8>,
    ) -> Result<RgbaImage, RenderError> {
        if canvas_size == 0 {
            return Err(RenderError::InvalidCanvas(canvas_size));
        }

        let mut canvas = RgbaImage::from_pixel(canvas_size, canvas_size, background);

        let em_px = (canvas_size as f32 * self.glyph_scale).floor();
        let (font_path, font) = self.locate_font(symbol).ok_or(RenderError::FontUnavailable {
            tried: self.candidates.len() + self.fallbacks.len(),
        })?;
        let scale = em_scale(&font, em_px);

        let support = probe_glyph(&font, symbol);
        if support != GlyphSupport::Supported {
            warn!(
                symbol,
                font = %font_path.display(),
                ?support,
                "Glyph may render as a placeholder"
            );
        }

        // Bitmap-only fonts have no outlines to measure, use the advance box
        let (text_w, text_h) =
            measure_ink(&font, scale, symbol).unwrap_or_else(|| text_size(scale, &font, symbol));

        let x = (canvas_size as i32 - text_w as i32) / 2;
        let y = (canvas_size as i32 - text_h as i32) / 2;
        draw_text_mut(&mut canvas, foreground, x, y, scale, &font, symbol);

        let coverage = ink_coverage_over(&canvas, background);
        if coverage < TOFU_COVERAGE_THRESHOLD {
            warn!(symbol, coverage, "Glyph render is nearly empty");
        }

        Ok(canvas)
    }
}

/// Load the first path that exists, parses as a font and passes `accept`.
/// Unreadable or invalid files count as missing.
fn first_loadable(
    paths: &[PathBuf],
    accept: impl Fn(&FontVec) -> bool,
) -> Option<(PathBuf, FontVec)> {
    paths.iter().find_map(|path| {
        let font = load_font(path)?;
        if accept(&font) {
            Some((path.clone(), font))
        } else {
            debug!(path = %path.display(), "Font has no outlines for symbol, skipping");
            None
        }
    })
}

fn load_font(path: &Path) -> Option<FontVec> {
    if !path.exists() {
        return None;
    }

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Font not readable");
            return None;
        }
    };

    // Collections (.ttc) load their first face
    match FontVec::try_from_vec_and_index(data, 0) {
        Ok(font) => Some(font),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Font not parseable");
            None
        }
    }
}

/// Pixel scale whose em square is `em_px` tall
fn em_scale<F: Font>(font: &F, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(em_px * font.height_unscaled() / upem),
        _ => PxScale::from(em_px),
    }
}

/// Ink bounding box of `text`, laid out the way `draw_text_mut` lays it out.
/// None when no glyph has an outline.
fn measure_ink<F: Font>(font: &F, scale: PxScale, text: &str) -> Option<(u32, u32)> {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0;
    let mut prev = None;
    let mut bounds: Option<(f32, f32, f32, f32)> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        if let Some(prev) = prev {
            caret += scaled.kern(id, prev);
        }
        prev = Some(id);

        let bb = outlined.px_bounds();
        bounds = Some(match bounds {
            None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
            Some((x0, y0, x1, y1)) => (
                x0.min(bb.min.x),
                y0.min(bb.min.y),
                x1.max(bb.max.x),
                y1.max(bb.max.y),
            ),
        });
    }

    let (x0, y0, x1, y1) = bounds?;
    Some(((x1 - x0).ceil() as u32, (y1 - y0).ceil() as u32))
}

/// Coverage of pixels that differ from the background
fn ink_coverage_over(canvas: &RgbaImage, background: Rgba<u8>) -> f32 {
    if background[3] == 0 {
        return ink_coverage(canvas);
    }
    let total = canvas.width() as f32 * canvas.height() as f32;
    canvas.pixels().filter(|p| **p != background).count() as f32 / total
}
