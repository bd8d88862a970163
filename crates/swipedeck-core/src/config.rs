use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            ui: UiConfig::default(),
            carousel: CarouselConfig::default(),
            keymap: KeymapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (image cache lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional deck file (TOML); the built-in deck is used when unset
    #[serde(default)]
    pub deck_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            deck_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
    /// Render card and avatar images (disable for plain boxes)
    #[serde(default = "default_true")]
    pub image_preview: bool,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            image_preview: default_true(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Easing curve for the paging transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the target when the transition ends
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
}

/// Carousel paging and animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Wrap from the last card back to the first
    #[serde(default = "default_true")]
    pub looping: bool,
    /// Committed paging transition duration in milliseconds
    #[serde(default = "default_snap_duration")]
    pub snap_duration_ms: u64,
    /// Easing curve for the paging transition
    #[serde(default = "default_easing")]
    pub easing: EasingType,
    /// Drag distance (in cards) past which a release commits the swipe
    #[serde(default = "default_commit_distance")]
    pub commit_distance: f64,
    /// Release velocity (cards/sec) past which a release commits the swipe
    #[serde(default = "default_commit_velocity")]
    pub commit_velocity: f64,
    /// Clamp for reported gesture velocity (cards/sec)
    #[serde(default = "default_max_velocity")]
    pub max_velocity: f64,
    /// Pagination dot spring stiffness
    #[serde(default = "default_dot_stiffness")]
    pub dot_stiffness: f64,
    /// Pagination dot spring damping (critical for the default stiffness)
    #[serde(default = "default_dot_damping")]
    pub dot_damping: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            looping: default_true(),
            snap_duration_ms: default_snap_duration(),
            easing: default_easing(),
            commit_distance: default_commit_distance(),
            commit_velocity: default_commit_velocity(),
            max_velocity: default_max_velocity(),
            dot_stiffness: default_dot_stiffness(),
            dot_damping: default_dot_damping(),
        }
    }
}

/// Theme name plus optional per-color overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name (currently "midnight" is bundled)
    #[serde(default = "default_theme_name")]
    pub name: String,
    /// Optional hex color overrides
    #[serde(default)]
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

/// Optional color overrides, each a hex string ("#52fb03" or "52fb03")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Primary background
    pub bg0: Option<String>,
    /// Secondary background (pills, badges)
    pub bg1: Option<String>,
    /// Tertiary background (status bar)
    pub bg2: Option<String>,
    /// Primary foreground
    pub fg0: Option<String>,
    /// Dimmed foreground
    pub fg1: Option<String>,
    /// Border / outline color
    pub outline: Option<String>,
    /// Accent color (avatar ring)
    pub accent: Option<String>,
    /// Active pagination dot
    pub dot_active: Option<String>,
    /// Inactive pagination dot
    pub dot_inactive: Option<String>,
    /// Error color
    pub error: Option<String>,
}

/// Key bindings in Vim-style notation
/// Format: "j", "G", "<C-d>" (Ctrl+d), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Swipe to the next card
    #[serde(default = "default_key_next_card")]
    pub next_card: String,
    /// Swipe to the previous card
    #[serde(default = "default_key_prev_card")]
    pub prev_card: String,
    /// Jump to the first card
    #[serde(default = "default_key_first_card")]
    pub first_card: String,
    /// Jump to the last card
    #[serde(default = "default_key_last_card")]
    pub last_card: String,
    /// Toggle looping at the deck boundaries
    #[serde(default = "default_key_toggle_looping")]
    pub toggle_looping: String,
    /// Toggle the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_card: default_key_next_card(),
            prev_card: default_key_prev_card(),
            first_card: default_key_first_card(),
            last_card: default_key_last_card(),
            toggle_looping: default_key_toggle_looping(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_card() -> String { "j".to_string() }
fn default_key_prev_card() -> String { "k".to_string() }
fn default_key_first_card() -> String { "gg".to_string() }
fn default_key_last_card() -> String { "G".to_string() }
fn default_key_toggle_looping() -> String { "L".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("swipedeck")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u16 {
    60
}

fn default_snap_duration() -> u64 {
    150
}

fn default_easing() -> EasingType {
    EasingType::Cubic
}

fn default_commit_distance() -> f64 {
    0.3
}

fn default_commit_velocity() -> f64 {
    1.5
}

fn default_max_velocity() -> f64 {
    8.0
}

fn default_dot_stiffness() -> f64 {
    400.0
}

// 2 * sqrt(400): no overshoot, no oscillation at rest
fn default_dot_damping() -> f64 {
    40.0
}

fn default_theme_name() -> String {
    "midnight".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/swipedeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("swipedeck")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the deck file path, if configured (with tilde expansion)
    pub fn deck_path(&self) -> Option<PathBuf> {
        self.general.deck_path.as_deref().map(expand_tilde)
    }
}
