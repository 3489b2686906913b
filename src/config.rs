//! Sprite tables and generator settings
//!
//! The filename→symbol tables are plain data handed to the batch driver.
//! They load from `config/sprites.toml`; the built-in defaults mirror that
//! file so the generator also runs without it.

use image::Rgba;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::*;
use crate::error::SetupError;
use crate::render::{RenderRequest, ShapeKind, Symbol, SymbolRasterizer};

/// One output file and what goes in it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "EntryDef")]
pub struct SpriteEntry {
    pub file: String,
    pub symbol: Symbol,
    /// Fill color; glyphs default to black, shapes must set one unless they
    /// carry a fixed palette
    pub color: Option<[u8; 4]>,
}

impl SpriteEntry {
    pub fn glyph(file: &str, text: &str) -> Self {
        Self {
            file: file.to_string(),
            symbol: Symbol::Glyph(text.to_string()),
            color: None,
        }
    }

    pub fn shape(file: &str, kind: ShapeKind, color: Option<[u8; 4]>) -> Self {
        Self {
            file: file.to_string(),
            symbol: Symbol::Shape(kind),
            color,
        }
    }

    pub fn request(&self, canvas_size: u32) -> RenderRequest {
        let request = RenderRequest::new(self.symbol.clone(), canvas_size);
        match self.color {
            Some(color) => request.with_fill(Rgba(color)),
            None => request,
        }
    }
}

/// Raw TOML form of an entry: exactly one of `glyph` / `shape`
#[derive(Debug, Deserialize)]
struct EntryDef {
    file: String,
    glyph: Option<String>,
    shape: Option<ShapeKind>,
    color: Option<[u8; 4]>,
}

impl TryFrom<EntryDef> for SpriteEntry {
    type Error = String;

    fn try_from(def: EntryDef) -> Result<Self, Self::Error> {
        let symbol = match (def.glyph, def.shape) {
            (Some(text), None) => Symbol::Glyph(text),
            (None, Some(kind)) => Symbol::Shape(kind),
            (Some(_), Some(_)) => {
                return Err(format!("{}: set either glyph or shape, not both", def.file));
            }
            (None, None) => return Err(format!("{}: missing glyph or shape", def.file)),
        };
        Ok(Self {
            file: def.file,
            symbol,
            color: def.color,
        })
    }
}

/// Files sharing a subdirectory and canvas size
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpriteGroup {
    pub dir: String,
    pub canvas_size: u32,
    #[serde(default, rename = "entry")]
    pub entries: Vec<SpriteEntry>,
}

/// Full generator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpriteConfig {
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    #[serde(default = "default_font_candidates")]
    pub font_candidates: Vec<PathBuf>,
    #[serde(default = "default_fallback_fonts")]
    pub fallback_fonts: Vec<PathBuf>,
    #[serde(default = "default_glyph_scale")]
    pub glyph_scale: f32,
    /// Render entries on the rayon pool
    #[serde(default)]
    pub parallel: bool,
    #[serde(default, rename = "group")]
    pub groups: Vec<SpriteGroup>,
}

fn default_output_root() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_ROOT)
}
fn default_font_candidates() -> Vec<PathBuf> {
    FONT_CANDIDATES.iter().map(PathBuf::from).collect()
}
fn default_fallback_fonts() -> Vec<PathBuf> {
    FALLBACK_FONTS.iter().map(PathBuf::from).collect()
}
fn default_glyph_scale() -> f32 {
    GLYPH_SCALE
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            font_candidates: default_font_candidates(),
            fallback_fonts: default_fallback_fonts(),
            glyph_scale: GLYPH_SCALE,
            parallel: false,
            groups: default_groups(),
        }
    }
}

/// Customer expressions and UI icons for the hotteok game
pub fn default_groups() -> Vec<SpriteGroup> {
    vec![
        SpriteGroup {
            dir: "customer".to_string(),
            canvas_size: CUSTOMER_CANVAS_SIZE,
            entries: vec![
                SpriteEntry::glyph("customer_neutral.png", "😐"),
                SpriteEntry::glyph("customer_happy.png", "😊"),
                SpriteEntry::glyph("customer_waiting.png", "😌"),
                SpriteEntry::glyph("customer_worried.png", "😟"),
                SpriteEntry::glyph("customer_angry.png", "😠"),
                SpriteEntry::glyph("customer_satisfied.png", "😄"),
                SpriteEntry::glyph("customer_confused.png", "😕"),
            ],
        },
        SpriteGroup {
            dir: "ui".to_string(),
            canvas_size: UI_CANVAS_SIZE,
            entries: vec![
                SpriteEntry::glyph("warning_icon.png", "⚠️"),
                SpriteEntry::glyph("heart_icon.png", "❤️"),
                SpriteEntry::glyph("angry_icon.png", "💥"),
                SpriteEntry::glyph("sugar_hotteok_icon.png", "🥞"), // Pancake stand-in
                SpriteEntry::glyph("seed_hotteok_icon.png", "🌰"),  // Chestnut stand-in
                // Drawn fallbacks for hosts without emoji fonts
                SpriteEntry::shape("warning_triangle.png", ShapeKind::Triangle, Some(WARNING_YELLOW)),
                SpriteEntry::shape("heart_red.png", ShapeKind::Heart, Some(HEART_RED)),
                SpriteEntry::shape("explosion_orange.png", ShapeKind::Explosion, Some(EXPLOSION_ORANGE)),
                SpriteEntry::shape("sugar_hotteok_custom.png", ShapeKind::SugarToken, None),
                SpriteEntry::shape("seed_hotteok_custom.png", ShapeKind::SeedToken, None),
            ],
        },
    ]
}

impl SpriteConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SetupError> {
        let config: Self =
            toml::from_str(content).map_err(|e| SetupError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicitly requested config file. Errors are fatal.
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SetupError::InvalidConfig(format!("could not read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded sprite config from {}", path.display());
        Ok(config)
    }

    /// Load the config file if present, otherwise use the built-in tables
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No {} found, using built-in sprite tables", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}, using built-in sprite tables", e);
                Self::default()
            }
        }
    }

    /// Font-backed rasterizer using this config's font lists
    pub fn rasterizer(&self) -> SymbolRasterizer {
        SymbolRasterizer::new(
            self.font_candidates.clone(),
            self.fallback_fonts.clone(),
            self.glyph_scale,
        )
    }

    pub fn total_entries(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Check everything the batch relies on before any file is touched
    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |msg: String| Err(SetupError::InvalidConfig(msg));

        if !(self.glyph_scale > 0.0) {
            return invalid(format!("glyph_scale must be positive, got {}", self.glyph_scale));
        }

        let mut dirs = HashSet::new();
        for group in &self.groups {
            if group.dir.is_empty() || group.dir.contains(['/', '\\']) || group.dir == ".." {
                return invalid(format!("group dir '{}' must be a plain name", group.dir));
            }
            if !dirs.insert(group.dir.as_str()) {
                return invalid(format!("group dir '{}' appears twice", group.dir));
            }
            if group.canvas_size == 0 {
                return invalid(format!("group '{}' has canvas_size 0", group.dir));
            }

            let mut files = HashSet::new();
            for entry in &group.entries {
                if !entry.file.ends_with(".png") || entry.file.contains(['/', '\\']) {
                    return invalid(format!(
                        "{}/{}: file must be a plain .png name",
                        group.dir, entry.file
                    ));
                }
                if !files.insert(entry.file.as_str()) {
                    return invalid(format!("{}/{} appears twice", group.dir, entry.file));
                }
                match &entry.symbol {
                    Symbol::Glyph(text) if text.is_empty() => {
                        return invalid(format!("{}/{}: empty glyph", group.dir, entry.file));
                    }
                    Symbol::Shape(kind) if entry.color.is_none() && !kind.has_fixed_palette() => {
                        return invalid(format!(
                            "{}/{}: {} needs a color",
                            group.dir, entry.file, kind
                        ));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}
