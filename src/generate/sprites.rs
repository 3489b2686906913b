//! Sprite batch generator
//!
//! Renders every entry of every group and writes it to
//! `<output_root>/<group.dir>/<entry.file>`. Only setup problems stop the
//! batch; a failed sprite is logged, recorded and skipped.

use image::ImageFormat;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::{SpriteConfig, SpriteEntry, SpriteGroup};
use crate::error::{RenderError, SetupError};
use crate::render::{GlyphRasterizer, RenderRequest, render};

/// A sprite that could not be generated
#[derive(Debug)]
pub struct SpriteFailure {
    pub path: PathBuf,
    pub error: RenderError,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub output_root: PathBuf,
    pub written: Vec<PathBuf>,
    pub failures: Vec<SpriteFailure>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.failures.len()
    }
}

/// Create the output root and one subdirectory per group
pub fn prepare_output(config: &SpriteConfig) -> Result<(), SetupError> {
    for group in &config.groups {
        let dir = config.output_root.join(&group.dir);
        fs::create_dir_all(&dir).map_err(|source| SetupError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Run the whole batch
pub fn run(
    config: &SpriteConfig,
    glyphs: &dyn GlyphRasterizer,
) -> Result<BatchReport, SetupError> {
    config.validate()?;
    prepare_output(config)?;

    let mut report = BatchReport {
        output_root: config.output_root.clone(),
        ..Default::default()
    };

    for group in &config.groups {
        info!(
            "Generating {} sprites in {}/ ({}px)",
            group.entries.len(),
            group.dir,
            group.canvas_size
        );

        for (path, result) in generate_group(config, group, glyphs) {
            match result {
                Ok(()) => {
                    info!("  Created: {}", path.display());
                    report.written.push(path);
                }
                Err(error) => {
                    error!("  Failed: {} - {}", path.display(), error);
                    report.failures.push(SpriteFailure { path, error });
                }
            }
        }
    }

    info!(
        "Generated {} of {} sprites in {}",
        report.succeeded(),
        report.total(),
        report.output_root.display()
    );
    Ok(report)
}

/// Render and save one group, keeping table order
fn generate_group(
    config: &SpriteConfig,
    group: &SpriteGroup,
    glyphs: &dyn GlyphRasterizer,
) -> Vec<(PathBuf, Result<(), RenderError>)> {
    let dir = config.output_root.join(&group.dir);
    let job = |entry: &SpriteEntry| {
        let path = dir.join(&entry.file);
        let result = generate_sprite(&path, &entry.request(group.canvas_size), glyphs);
        (path, result)
    };

    if config.parallel {
        group.entries.par_iter().map(job).collect()
    } else {
        group.entries.iter().map(job).collect()
    }
}

/// Render one request and write it as PNG, replacing any existing file
pub fn generate_sprite(
    path: &Path,
    request: &RenderRequest,
    glyphs: &dyn GlyphRasterizer,
) -> Result<(), RenderError> {
    let img = render(request, glyphs)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| RenderError::Save {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ShapeKind, Symbol};
    use image::{Rgba, RgbaImage};

    struct NoFonts;

    impl GlyphRasterizer for NoFonts {
        fn render_glyph_on(
            &self,
            _symbol: &str,
            _canvas_size: u32,
            _foreground: Rgba<u8>,
            _background: Rgba<u8>,
        ) -> Result<RgbaImage, RenderError> {
            Err(RenderError::FontUnavailable { tried: 0 })
        }
    }

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("sprites_unit_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_font_unavailable_writes_nothing() {
        let root = temp_root();
        let config = SpriteConfig {
            output_root: root.clone(),
            groups: vec![SpriteGroup {
                dir: "customer".to_string(),
                canvas_size: 128,
                entries: vec![SpriteEntry::glyph("customer_happy.png", "😊")],
            }],
            ..Default::default()
        };

        let report = run(&config, &NoFonts).unwrap();
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            RenderError::FontUnavailable { .. }
        ));
        assert!(!root.join("customer/customer_happy.png").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_invalid_config_touches_nothing() {
        let root = temp_root();
        let config = SpriteConfig {
            output_root: root.clone(),
            groups: vec![SpriteGroup {
                dir: "ui".to_string(),
                canvas_size: 0,
                entries: Vec::new(),
            }],
            ..Default::default()
        };

        assert!(matches!(
            run(&config, &NoFonts),
            Err(SetupError::InvalidConfig(_))
        ));
        assert!(!root.exists());
    }

    #[test]
    fn test_output_root_blocked_by_file() {
        let blocker = temp_root();
        fs::write(&blocker, b"not a directory").unwrap();
        let config = SpriteConfig {
            output_root: blocker.clone(),
            ..Default::default()
        };

        assert!(matches!(
            run(&config, &NoFonts),
            Err(SetupError::CreateDir { .. })
        ));

        let _ = fs::remove_file(&blocker);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let root = temp_root();
        fs::create_dir_all(&root).unwrap();
        let path = root.join("explosion_orange.png");
        fs::write(&path, b"stale").unwrap();

        let request = RenderRequest::new(Symbol::Shape(ShapeKind::Explosion), 64)
            .with_fill(Rgba([255, 150, 0, 255]));
        generate_sprite(&path, &request, &NoFonts).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (64, 64));

        let _ = fs::remove_dir_all(&root);
    }
}
