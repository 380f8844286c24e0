use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CarouscrollError, Result};
use crate::rotator::DEFAULT_VISIBLE_SLOTS;

/// RGB color values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mix toward `background` by `1 - opacity`
    pub fn blend(self, background: Rgb, opacity: f32) -> Rgb {
        let opacity = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * opacity + bg as f32 * (1.0 - opacity)).round() as u8
        };
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

/// Theme color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Carousel strip, headings and the selected heading background
    pub accent: Rgb,
    /// Carousel arrows
    pub accent_text: Rgb,
    /// Focused title and selected heading text
    pub highlight: Rgb,
    /// Boundary indicator bar
    pub indicator: Rgb,
    /// Secondary text
    pub muted: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            accent: Rgb::new(234, 153, 153),
            accent_text: Rgb::new(102, 0, 0),
            highlight: Rgb::new(255, 255, 255),
            indicator: Rgb::new(136, 136, 136),
            muted: Rgb::new(140, 140, 140),
        }
    }
}

impl ThemeColors {
    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            accent: Rgb::new(243, 139, 168),      // Red
            accent_text: Rgb::new(30, 30, 46),    // Base
            highlight: Rgb::new(205, 214, 244),   // Text
            indicator: Rgb::new(108, 112, 134),   // Overlay0
            muted: Rgb::new(166, 173, 200),       // Subtext0
        }
    }

    /// High contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            accent: Rgb::new(255, 255, 0),
            accent_text: Rgb::new(0, 0, 0),
            highlight: Rgb::new(255, 255, 255),
            indicator: Rgb::new(200, 200, 200),
            muted: Rgb::new(200, 200, 200),
        }
    }

    /// Get theme by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "default" => Some(Self::default()),
            "catppuccinmocha" => Some(Self::catppuccin_mocha()),
            "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}

/// Theme configuration - either a preset name or custom colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeConfig {
    /// Preset theme name
    Preset(String),
    /// Custom color configuration
    Custom(ThemeColors),
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig::Preset("default".to_string())
    }
}

impl ThemeConfig {
    /// Resolve to actual theme colors
    pub fn resolve(&self) -> ThemeColors {
        match self {
            ThemeConfig::Preset(name) => ThemeColors::from_name(name).unwrap_or_default(),
            ThemeConfig::Custom(colors) => colors.clone(),
        }
    }
}

/// How the self-scroll guard is released after a scroll-to
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum GuardRelease {
    /// When the host reports the scroll animation finished
    #[default]
    AnimationComplete,
    /// After a fixed delay
    Delay { ms: u64 },
}

/// Behavior options shared by every widget instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    #[serde(default = "default_visible_slots")]
    pub visible_slots: usize,

    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,

    #[serde(default)]
    pub guard_release: GuardRelease,

    /// Below this gesture speed a tap on the content passes through
    #[serde(default = "default_stop_velocity")]
    pub stop_velocity: f64,

    /// Horizontal drag distance that rotates the carousel by one title
    #[serde(default = "default_drag_step")]
    pub carousel_drag_step: u16,
}

fn default_visible_slots() -> usize {
    DEFAULT_VISIBLE_SLOTS
}

fn default_animation_ms() -> u64 {
    200
}

fn default_stop_velocity() -> f64 {
    0.1
}

fn default_drag_step() -> u16 {
    8
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            visible_slots: default_visible_slots(),
            animation_ms: default_animation_ms(),
            guard_release: GuardRelease::default(),
            stop_velocity: default_stop_velocity(),
            carousel_drag_step: default_drag_step(),
        }
    }
}

impl WidgetOptions {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

/// Configuration settings for carouscroll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub widget: WidgetOptions,

    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_tick_rate_ms() -> u64 {
    16
}

impl Default for Config {
    fn default() -> Self {
        Self {
            widget: WidgetOptions::default(),
            tick_rate_ms: default_tick_rate_ms(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.carouscroll.json)
    fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".carouscroll.json"))
            .ok_or_else(|| {
                CarouscrollError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "could not find home directory",
                ))
            })
    }

    /// Ensure the config file exists, creating it with defaults if not
    fn ensure_config_file() -> Result<()> {
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            let default_config = Config::default();
            let data = serde_json::to_string_pretty(&default_config)?;
            fs::write(&config_path, data)?;
        }
        Ok(())
    }

    /// Load configuration from file, merging with defaults
    pub fn load() -> Result<Self> {
        Self::ensure_config_file()?;

        let config_path = Self::config_file_path()?;
        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("failed to load config: {err}, using defaults");
                Self::default()
            }
        }
    }
}
