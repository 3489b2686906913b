//! Asset generation
//!
//! Renders the sprite tables from the config into PNG files.

pub mod sprites;

pub use sprites::{BatchReport, SpriteFailure, generate_sprite, prepare_output, run};
