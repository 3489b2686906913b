//! Sprite generator
//!
//! Usage:
//!   cargo run                                  # Built-in tables or config/sprites.toml
//!   cargo run -- --config my_sprites.toml      # Explicit config file
//!   cargo run -- --out Assets/Sprites/hotteok  # Override the output root
//!   cargo run -- --parallel                    # Render on all cores
//!   cargo run -- --help                        # Show help

use hotteok_sprites::{SPRITES_CONFIG_FILE, SpriteConfig, generate, logging};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Default)]
struct Args {
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    parallel: bool,
}

fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = iter.next().ok_or("--config requires a file path")?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--out" | "-o" => {
                let value = iter.next().ok_or("--out requires a directory")?;
                parsed.out = Some(PathBuf::from(value));
            }
            "--parallel" => parsed.parallel = true,
            "--help" | "-h" | "help" => return Ok(None),
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }

    Ok(Some(parsed))
}

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}\n", e);
            print_help();
            std::process::exit(1);
        }
    };

    let mut config = match &args.config {
        Some(path) => match SpriteConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => SpriteConfig::load_or_default(Path::new(SPRITES_CONFIG_FILE)),
    };
    if let Some(out) = args.out {
        config.output_root = out;
    }
    config.parallel |= args.parallel;

    info!("=== Hotteok Sprite Generator ===");
    let rasterizer = config.rasterizer();
    let report = match generate::run(&config, &rasterizer) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if !report.failures.is_empty() {
        info!("{} sprites failed:", report.failures.len());
        for failure in &report.failures {
            info!("  {} - {}", failure.path.display(), failure.error);
        }
    }

    let root = report
        .output_root
        .canonicalize()
        .unwrap_or_else(|_| report.output_root.clone());
    info!("Output: {}", root.display());
    info!("Unity import:");
    info!("  1. Copy {} into Assets/Sprites/", root.display());
    info!("  2. Set every image's Texture Type to 'Sprite (2D and UI)'");
    info!("  3. Hook them up in CustomerAnimator and CustomerUI");
    info!("If emoji sprites come out blank, use the drawn fallback icons instead");
}

fn print_help() {
    println!(
        r#"Hotteok Sprite Generator - Render customer and UI sprites to PNG

USAGE:
    generate_sprites [OPTIONS]

OPTIONS:
    -c, --config <FILE>   Sprite tables and font lists (TOML)
                          Default: {} if present, else built-in tables
    -o, --out <DIR>       Output root (overrides the config)
        --parallel        Render each group on all cores
    -h, --help            Show this help message

OUTPUT:
    <root>/customer/*.png   128px customer expressions
    <root>/ui/*.png         64px UI icons, drawn fallbacks and hotteok tokens

ENVIRONMENT:
    RUST_LOG              Log filter (default: info)
"#,
        SPRITES_CONFIG_FILE
    );
}
