//! Hotteok sprites - PNG sprite generator for the hotteok stall game
//!
//! Renders customer expressions and UI icons, from emoji glyphs or from
//! procedural shapes, into a directory tree the game project imports.

pub mod config;
pub mod constants;
pub mod error;
pub mod generate;
pub mod logging;
pub mod render;

// Re-export commonly used types for convenience
pub use config::{SpriteConfig, SpriteEntry, SpriteGroup, default_groups};
pub use constants::*;
pub use error::{RenderError, SetupError};
pub use generate::{BatchReport, SpriteFailure, generate_sprite};
pub use render::{
    GlyphRasterizer, GlyphSupport, RenderRequest, ShapeKind, Symbol, SymbolRasterizer,
    explosion_vertices, ink_coverage, render, render_shape,
};
