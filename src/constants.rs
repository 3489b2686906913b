//! Sprite constants
//!
//! Canvas sizes, colors and file locations shared by the renderers and the
//! batch driver.

use image::Rgba;

// =============================================================================
// FILES
// =============================================================================

/// Path to the sprite table config
pub const SPRITES_CONFIG_FILE: &str = "config/sprites.toml";

/// Default output root, relative to the working directory
pub const DEFAULT_OUTPUT_ROOT: &str = "hotteok_game_sprites";

// =============================================================================
// CANVAS
// =============================================================================

pub const CUSTOMER_CANVAS_SIZE: u32 = 128;
pub const UI_CANVAS_SIZE: u32 = 64;

/// Glyph em size as a fraction of the canvas
pub const GLYPH_SCALE: f32 = 0.7;

/// Below this fraction of inked pixels a glyph render is reported as suspect
pub const TOFU_COVERAGE_THRESHOLD: f32 = 0.02;

// =============================================================================
// COLORS
// =============================================================================

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
pub const GLYPH_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub const WARNING_YELLOW: [u8; 4] = [255, 255, 0, 255];
pub const HEART_RED: [u8; 4] = [255, 100, 100, 255];
pub const EXPLOSION_ORANGE: [u8; 4] = [255, 150, 0, 255];

// Sugar hotteok token
pub const SUGAR_CRUST: Rgba<u8> = Rgba([139, 69, 19, 255]); // Brown
pub const SUGAR_FILLING: Rgba<u8> = Rgba([255, 215, 0, 255]); // Gold
pub const SUGAR_SHINE: Rgba<u8> = Rgba([255, 255, 255, 200]); // Translucent white

// Seed hotteok token
pub const SEED_CRUST: Rgba<u8> = Rgba([101, 67, 33, 255]); // Dark brown
pub const SEED_FILLING: Rgba<u8> = Rgba([160, 82, 45, 255]); // Tan
pub const SEED_DOT: Rgba<u8> = Rgba([0, 0, 0, 255]);

// =============================================================================
// FONTS
// =============================================================================

/// Emoji-capable fonts, tried in order
pub const FONT_CANDIDATES: &[&str] = &[
    // Windows
    "C:/Windows/Fonts/seguiemj.ttf",
    "C:/Windows/Fonts/NotoColorEmoji.ttf",
    // macOS
    "/System/Library/Fonts/Apple Color Emoji.ttc",
    "/Library/Fonts/Apple Color Emoji.ttc",
    // Linux
    "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// Baseline fonts used when no candidate is usable
pub const FALLBACK_FONTS: &[&str] = &[
    "C:/Windows/Fonts/arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
];
