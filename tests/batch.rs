//! End-to-end batch runs against a temporary output root

use hotteok_sprites::{
    GlyphRasterizer, RenderError, SetupError, SpriteConfig, SpriteEntry, SpriteGroup, generate,
};
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Stands in for a font: fills a centred square with the foreground color
struct BoxGlyphs;

impl GlyphRasterizer for BoxGlyphs {
    fn render_glyph_on(
        &self,
        _symbol: &str,
        canvas_size: u32,
        foreground: Rgba<u8>,
        background: Rgba<u8>,
    ) -> Result<RgbaImage, RenderError> {
        let mut img = RgbaImage::from_pixel(canvas_size, canvas_size, background);
        let margin = canvas_size / 4;
        for y in margin..canvas_size - margin {
            for x in margin..canvas_size - margin {
                img.put_pixel(x, y, foreground);
            }
        }
        Ok(img)
    }
}

/// Fails for one symbol, draws the rest
struct FailOn(&'static str);

impl GlyphRasterizer for FailOn {
    fn render_glyph_on(
        &self,
        symbol: &str,
        canvas_size: u32,
        foreground: Rgba<u8>,
        background: Rgba<u8>,
    ) -> Result<RgbaImage, RenderError> {
        if symbol == self.0 {
            return Err(RenderError::Failed(format!("forced failure for {}", symbol)));
        }
        BoxGlyphs.render_glyph_on(symbol, canvas_size, foreground, background)
    }
}

fn temp_config() -> SpriteConfig {
    let root = std::env::temp_dir().join(format!("hotteok_sprites_{}", uuid::Uuid::new_v4()));
    SpriteConfig {
        output_root: root,
        ..Default::default()
    }
}

fn png_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
        .collect();
    files.sort();
    files
}

#[test]
fn full_batch_writes_every_sprite() {
    let config = temp_config();
    let report = generate::run(&config, &BoxGlyphs).unwrap();

    assert_eq!(report.succeeded(), 17);
    assert!(report.failures.is_empty());

    let customer = png_files(&config.output_root.join("customer"));
    let ui = png_files(&config.output_root.join("ui"));
    assert_eq!(customer.len(), 7);
    assert_eq!(ui.len(), 10);

    for path in &customer {
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (128, 128), "{}", path.display());
        assert!(img.color().has_alpha());
    }
    for path in &ui {
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (64, 64), "{}", path.display());
    }

    let _ = fs::remove_dir_all(&config.output_root);
}

#[test]
fn parallel_batch_matches_sequential() {
    let sequential = temp_config();
    let mut parallel = temp_config();
    parallel.parallel = true;

    let a = generate::run(&sequential, &BoxGlyphs).unwrap();
    let b = generate::run(&parallel, &BoxGlyphs).unwrap();
    assert_eq!(a.succeeded(), b.succeeded());

    for (left, right) in a.written.iter().zip(&b.written) {
        assert_eq!(left.file_name(), right.file_name());
        let left = image::open(left).unwrap().to_rgba8();
        let right = image::open(right).unwrap().to_rgba8();
        assert_eq!(left.as_raw(), right.as_raw());
    }

    let _ = fs::remove_dir_all(&sequential.output_root);
    let _ = fs::remove_dir_all(&parallel.output_root);
}

#[test]
fn one_failure_does_not_stop_the_batch() {
    let config = temp_config();
    let report = generate::run(&config, &FailOn("😟")).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.succeeded(), config.total_entries() - 1);
    assert!(report.failures[0].path.ends_with("customer/customer_worried.png"));
    assert!(matches!(report.failures[0].error, RenderError::Failed(_)));

    // Entries after the failed one were still generated
    assert!(config.output_root.join("customer/customer_angry.png").exists());
    assert!(config.output_root.join("ui/seed_hotteok_custom.png").exists());
    assert!(!config.output_root.join("customer/customer_worried.png").exists());

    let _ = fs::remove_dir_all(&config.output_root);
}

#[test]
fn rerun_overwrites_in_place() {
    let config = temp_config();
    generate::run(&config, &BoxGlyphs).unwrap();
    let report = generate::run(&config, &BoxGlyphs).unwrap();

    assert_eq!(report.succeeded(), 17);
    assert_eq!(png_files(&config.output_root.join("ui")).len(), 10);

    let _ = fs::remove_dir_all(&config.output_root);
}

#[test]
fn token_files_are_pixel_identical_across_runs() {
    let first = temp_config();
    let second = temp_config();
    generate::run(&first, &BoxGlyphs).unwrap();
    generate::run(&second, &BoxGlyphs).unwrap();

    for file in ["sugar_hotteok_custom.png", "seed_hotteok_custom.png"] {
        let a = image::open(first.output_root.join("ui").join(file)).unwrap().to_rgba8();
        let b = image::open(second.output_root.join("ui").join(file)).unwrap().to_rgba8();
        assert_eq!(a.as_raw(), b.as_raw(), "{}", file);
    }

    let _ = fs::remove_dir_all(&first.output_root);
    let _ = fs::remove_dir_all(&second.output_root);
}

#[test]
fn custom_table_with_missing_fonts_writes_only_shapes() {
    let mut config = temp_config();
    config.font_candidates = vec![PathBuf::from("/nonexistent/emoji.ttf")];
    config.fallback_fonts = Vec::new();
    config.groups = vec![SpriteGroup {
        dir: "ui".to_string(),
        canvas_size: 64,
        entries: vec![
            SpriteEntry::glyph("heart_icon.png", "❤️"),
            SpriteEntry::shape(
                "heart_red.png",
                hotteok_sprites::ShapeKind::Heart,
                Some(hotteok_sprites::HEART_RED),
            ),
        ],
    }];

    let rasterizer = config.rasterizer();
    let report = generate::run(&config, &rasterizer).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert!(matches!(
        report.failures[0].error,
        RenderError::FontUnavailable { tried: 1 }
    ));
    assert!(!config.output_root.join("ui/heart_icon.png").exists());
    assert!(config.output_root.join("ui/heart_red.png").exists());

    let _ = fs::remove_dir_all(&config.output_root);
}

#[test]
fn shipped_config_matches_built_in_tables() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/sprites.toml");
    let config = SpriteConfig::load(&path).unwrap();
    assert_eq!(config, SpriteConfig::default());
}

#[test]
fn bad_config_is_a_setup_error() {
    let mut config = temp_config();
    config.groups[0].dir = String::new();
    assert!(matches!(
        generate::run(&config, &BoxGlyphs),
        Err(SetupError::InvalidConfig(_))
    ));
    assert!(!config.output_root.exists());
}
