//! Sprite renderers
//!
//! Two independent ways of producing a square RGBA bitmap:
//! - Glyphs rendered through a system font
//! - Shapes drawn from geometry

pub mod glyph;
pub mod probe;
pub mod shapes;

pub use glyph::{GlyphRasterizer, SymbolRasterizer};
pub use probe::{GlyphSupport, ink_coverage, probe_glyph};
pub use shapes::{ShapeKind, explosion_vertices, render_shape, render_shape_on};

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::RenderError;

/// What to draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Glyph(String),
    Shape(ShapeKind),
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Glyph(text) => write!(f, "{}", text),
            Symbol::Shape(kind) => write!(f, "<{}>", kind),
        }
    }
}

/// One render call's parameters
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub symbol: Symbol,
    pub canvas_size: u32,
    pub fill: Rgba<u8>,
    pub background: Rgba<u8>,
}

impl RenderRequest {
    pub fn new(symbol: Symbol, canvas_size: u32) -> Self {
        Self {
            symbol,
            canvas_size,
            fill: GLYPH_COLOR,
            background: TRANSPARENT,
        }
    }

    pub fn with_fill(mut self, fill: Rgba<u8>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }
}

/// Render a request with the matching renderer
pub fn render(
    request: &RenderRequest,
    glyphs: &dyn GlyphRasterizer,
) -> Result<RgbaImage, RenderError> {
    match &request.symbol {
        Symbol::Glyph(text) => glyphs.render_glyph_on(
            text,
            request.canvas_size,
            request.fill,
            request.background,
        ),
        Symbol::Shape(kind) => {
            render_shape_on(*kind, request.canvas_size, request.fill, request.background)
        }
    }
}
