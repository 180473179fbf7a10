//! Profile configuration
//!
//! Everything the generator needs comes from one TOML file. Every field has a
//! default, so an empty file renders the stock profile.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gifos_anim::{CompressionAlgorithm, TickScale};
use gifos_terminal::Theme;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the animation is written
    pub output: PathBuf,
    pub looping: bool,
    pub terminal: TerminalConfig,
    pub timing: TimingConfig,
    pub profile: ProfileConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("os.gif"),
            looping: true,
            terminal: TerminalConfig::default(),
            timing: TimingConfig::default(),
            profile: ProfileConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    pub width: u32,
    pub height: u32,
    /// Glyph scale factor
    pub scale: u32,
    pub theme: ThemeChoice,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            width: 830,
            height: 600,
            scale: 2,
            theme: ThemeChoice::default(),
        }
    }
}

/// A built-in theme by name, or explicit colors
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ThemeChoice {
    Named(String),
    Custom(Theme),
}

impl Default for ThemeChoice {
    fn default() -> Self {
        ThemeChoice::Named("default".to_string())
    }
}

impl ThemeChoice {
    pub fn resolve(&self) -> Theme {
        match self {
            ThemeChoice::Named(name) => Theme::by_name(name),
            ThemeChoice::Custom(theme) => *theme,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Milliseconds per tick
    pub tick_ms: u32,
    pub snapshot_compression: CompressionAlgorithm,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            snapshot_compression: CompressionAlgorithm::default(),
        }
    }
}

impl TimingConfig {
    pub fn tick_scale(&self) -> TickScale {
        TickScale::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    pub user_id: u64,
    pub username: String,
    pub real_name: String,
    pub location: String,
    pub hostname: String,
    pub os_name: String,
    pub os_version: String,
    pub last_login: String,
    pub documentation_url: String,
    /// Shown top-right during boot
    pub logo: Option<PathBuf>,
    /// Shown bottom-right next to the stats
    pub avatar: Option<PathBuf>,
    pub stats: StatsConfig,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_id: 0,
            username: "visitor".to_string(),
            real_name: "Visitor".to_string(),
            location: "Earth".to_string(),
            hostname: "github".to_string(),
            os_name: "GifOS".to_string(),
            os_version: "v0.1.0".to_string(),
            last_login: "Sat, 15 Oct 2022 10:00:00 UTC".to_string(),
            documentation_url: "https://github.com".to_string(),
            logo: None,
            avatar: None,
            stats: StatsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsConfig {
    pub total_stars: u64,
    pub total_followers: u64,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read a config file. Relative asset paths are resolved against the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for asset in [&mut self.profile.logo, &mut self.profile.avatar]
            .into_iter()
            .flatten()
        {
            if asset.is_relative() {
                *asset = base.join(&*asset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gifos_terminal::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
            output = "out/profile.gif"
            looping = false

            [terminal]
            width = 640
            height = 480
            scale = 1
            theme = "nord"

            [timing]
            tick_ms = 20
            snapshot_compression = "zstd"

            [profile]
            username = "octocat"
            user_id = 583231
            location = "San Francisco"
            logo = "gh.png"

            [profile.stats]
            total_stars = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("out/profile.gif"));
        assert!(!config.looping);
        assert_eq!(config.terminal.width, 640);
        assert_eq!(config.terminal.theme.resolve(), Theme::by_name("nord"));
        assert_eq!(config.timing.tick_scale(), TickScale::from_millis(20));
        assert_eq!(
            config.timing.snapshot_compression,
            CompressionAlgorithm::Zstd
        );
        assert_eq!(config.profile.username, "octocat");
        assert_eq!(config.profile.user_id, 583231);
        assert_eq!(config.profile.location, "San Francisco");
        assert_eq!(config.profile.real_name, "Visitor");
        assert_eq!(config.profile.hostname, "github");
        assert_eq!(config.profile.stats.total_stars, 42);
        assert_eq!(config.profile.stats.total_followers, 0);
    }

    #[test]
    fn test_custom_theme_table() {
        let config = Config::from_toml(
            r##"
            [terminal.theme]
            background = "#000000"
            foreground = "#00ff00"
            highlight = "#ffffff"
            "##,
        )
        .unwrap();

        let theme = config.terminal.theme.resolve();
        assert_eq!(theme.foreground, Color::rgb(0, 0xff, 0));
        assert_eq!(theme.highlight, Color::WHITE);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let result = Config::from_toml(
            r##"
            [terminal.theme]
            background = "black"
            foreground = "#00ff00"
            highlight = "#ffffff"
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(Config::from_toml("colour = 3").is_err());
    }

    #[test]
    fn test_relative_assets_resolve_against_config_dir() {
        let mut config = Config::default();
        config.profile.logo = Some(PathBuf::from("gh.png"));
        config.profile.avatar = Some(PathBuf::from("/abs/avatar.png"));
        config.resolve_paths(Path::new("/etc/gifos"));

        assert_eq!(config.profile.logo, Some(PathBuf::from("/etc/gifos/gh.png")));
        assert_eq!(config.profile.avatar, Some(PathBuf::from("/abs/avatar.png")));
    }
}
