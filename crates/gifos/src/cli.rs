use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gifos_anim::CompressionAlgorithm;
use gifos_terminal::{GlyphAtlas, Theme};
use tracing::{debug, info};

use crate::{
    config::{Config, ThemeChoice},
    profile::{ProfileAssets, ProfileScript},
    renderer::{RenderOptions, Renderer},
};

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "GifOS - render a terminal profile animation")]
struct Args {
    /// Profile configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output path, overriding the config file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Play the animation once instead of looping
    #[arg(long)]
    no_loop: bool,

    /// Built-in theme, overriding the config file
    #[arg(short, long, value_parser = clap::builder::PossibleValuesParser::new(Theme::NAMES))]
    theme: Option<String>,

    /// How recorded frames are kept in memory
    #[arg(long, value_enum)]
    compression: Option<CompressionAlgorithm>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

impl Args {
    /// Load the config file, if any, and apply command-line overrides
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.no_loop {
            config.looping = false;
        }
        if let Some(theme) = &self.theme {
            config.terminal.theme = ThemeChoice::Named(theme.clone());
        }
        if let Some(compression) = self.compression {
            config.timing.snapshot_compression = compression;
        }
        Ok(config)
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level {
        LogLevel::Trace => tracing::Level::TRACE,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .init();

    let config = args.config()?;
    debug!("{config:?}");
    render(&config)
}

/// Render the configured profile to its output path
pub fn render(config: &Config) -> Result<()> {
    let (width, height) = (config.terminal.width, config.terminal.height);

    let options = RenderOptions {
        atlas: Arc::new(GlyphAtlas::new(config.terminal.scale)),
        tick_scale: config.timing.tick_scale(),
        compression: config.timing.snapshot_compression,
        ..RenderOptions::default()
    };
    let mut renderer =
        Renderer::with_options(width, height, config.terminal.theme.resolve(), options)
            .context("Failed to create terminal")?;
    info!(
        "Terminal is {}x{} cells ({width}x{height} px)",
        renderer.cols(),
        renderer.rows()
    );

    let assets = ProfileAssets::load(&config.profile, width).context("Failed to load images")?;
    let script = ProfileScript::new(&config.profile, (width, height), assets).build();
    renderer.run(script).context("Failed to render profile")?;

    if let Some(dir) = config.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let stats = renderer
        .encode_to(&config.output, config.looping)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    info!(
        "{} frames, {} colors, {:.1}s",
        stats.frames,
        stats.palette_colors,
        stats.total_centiseconds as f64 / 100.0
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "gifos",
            "--output",
            "out.gif",
            "--no-loop",
            "--theme",
            "matrix",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = args.config().unwrap();
        assert_eq!(config.output, PathBuf::from("out.gif"));
        assert!(!config.looping);
        assert_eq!(config.terminal.theme.resolve(), Theme::by_name("matrix"));
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(Args::try_parse_from(["gifos", "--theme", "neon"]).is_err());
    }
}
