//! tgakit command-line entry point.
//!
//! Renders a test pattern, encodes it as uncompressed TGA, and reports how
//! long generation and each write took.

mod pattern;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tgakit_common::config::{KitConfig, PatternKind};
use tgakit_common::time::{MonotonicClock, Stopwatch};
use tgakit_tga::TgaImage;
use tracing::{info, warn};

use crate::report::{micros, RunReport};

/// tgakit command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "tgakit",
    about = "Render a test pattern to an uncompressed TGA file",
    version,
    long_about = None
)]
struct Args {
    /// Path to a configuration file (TOML).
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file (overrides config file).
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<usize>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<usize>,

    /// Pattern to render (gradient, checkerboard, solid).
    #[arg(long, value_parser = parse_pattern)]
    pattern: Option<PatternKind>,

    /// Number of times to write the image.
    #[arg(long)]
    repeat: Option<u32>,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

fn parse_pattern(s: &str) -> Result<PatternKind, String> {
    match s {
        "gradient" => Ok(PatternKind::Gradient),
        "checkerboard" => Ok(PatternKind::Checkerboard),
        "solid" => Ok(PatternKind::Solid),
        other => Err(format!(
            "unknown pattern '{other}' (expected gradient, checkerboard, or solid)"
        )),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting tgakit");

    let mut config = load_config(&args)?;
    apply_overrides(&mut config, &args);
    config.validate().context("Invalid configuration")?;

    info!(
        output = %config.output.display(),
        width = config.width,
        height = config.height,
        pattern = %config.pattern,
        "Configuration loaded"
    );

    let report = run(&config)?;

    info!(
        file_bytes = report.file_bytes,
        generate_us = report.generate_us,
        total_write_us = report.total_write_us(),
        max_write_us = report.max_write_us().unwrap_or(0),
        "Done"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{json}");
    }

    Ok(())
}

/// Initialize logging with the specified log level.
fn init_logging(level: &str) {
    let filter = format!("tgakit={level},tgakit_common={level},tgakit_tga={level}");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration from file or use defaults.
///
/// Resolution priority (first existing file wins):
/// 1. Command-line `--config` argument
/// 2. `TGAKIT_CONFIG_PATH` environment variable
/// 3. `config/default.toml` (local development)
/// 4. Built-in defaults
fn load_config(args: &Args) -> Result<KitConfig> {
    if let Some(config_path) = &args.config {
        info!(?config_path, "Loading config from command-line argument");
        return KitConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    if let Ok(env_path) = std::env::var("TGAKIT_CONFIG_PATH") {
        let config_path = PathBuf::from(&env_path);
        if config_path.exists() {
            info!(?config_path, "Loading config from TGAKIT_CONFIG_PATH");
            return KitConfig::from_file(&config_path).with_context(|| {
                format!("Failed to load config from TGAKIT_CONFIG_PATH={env_path}")
            });
        }
        warn!(
            path = %env_path,
            "TGAKIT_CONFIG_PATH set but file does not exist, checking other locations"
        );
    }

    let local_path = PathBuf::from("config/default.toml");
    if local_path.exists() {
        info!(?local_path, "Loading config from local path");
        return KitConfig::from_file(&local_path)
            .with_context(|| format!("Failed to load config from {}", local_path.display()));
    }

    info!("No config file found, using built-in defaults");
    Ok(KitConfig::default())
}

/// Command-line values win over anything loaded from a file.
fn apply_overrides(config: &mut KitConfig, args: &Args) {
    if let Some(output) = &args.output {
        config.output.clone_from(output);
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(pattern) = args.pattern {
        config.pattern = pattern;
    }
    if let Some(repeat) = args.repeat {
        config.repeat = repeat;
    }
}

/// Generate, encode, and write the configured image.
fn run(config: &KitConfig) -> Result<RunReport> {
    let mut sw = Stopwatch::new();

    sw.start()?;
    let rgb = pattern::generate(config);
    sw.stop()?;
    let generate_us = micros(&sw);

    let image = TgaImage::new(Some(rgb.as_slice()), config.width, config.height)
        .context("Failed to build image")?;

    let mut write_us = Vec::with_capacity(usize::try_from(config.repeat).unwrap_or(0));
    for pass in 1..=config.repeat {
        sw.start()?;
        image
            .write(&config.output)
            .with_context(|| format!("Failed to write {}", config.output.display()))?;
        let elapsed = sw.stop()?;

        if elapsed > config.slow_write_threshold {
            warn!(
                pass,
                elapsed_us = micros(&sw),
                threshold = ?config.slow_write_threshold,
                "Slow write"
            );
        }
        write_us.push(micros(&sw));
    }

    Ok(RunReport {
        output: config.output.clone(),
        width: image.width(),
        height: image.height(),
        pattern: config.pattern,
        file_bytes: image.encoded_len(),
        generate_us,
        write_us,
        clock: MonotonicClock::global().kind(),
    })
}
