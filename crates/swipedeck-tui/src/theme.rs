use ratatui::style::Color;
use tracing::warn;

use swipedeck_core::config::{ThemeColorOverrides, ThemeConfig};

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,

    // Chrome
    pub outline: Color,
    pub accent: Color,
    pub dot_active: Color,
    pub dot_inactive: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // "midnight": the near-black social feed look
        Self {
            bg0: Color::Rgb(0x00, 0x00, 0x00),
            bg1: Color::Rgb(0x1a, 0x1a, 0x1a),
            bg2: Color::Rgb(0x2a, 0x2a, 0x2a),
            fg0: Color::Rgb(0xff, 0xff, 0xff),
            fg1: Color::Rgb(0x9a, 0x9a, 0x9a),
            outline: Color::Rgb(0x33, 0x33, 0x33),
            accent: Color::Rgb(0x52, 0xfb, 0x03),
            dot_active: Color::Rgb(0xff, 0xff, 0xff),
            dot_inactive: Color::Rgb(0x66, 0x66, 0x66),
            error: Color::Rgb(0xea, 0x69, 0x62),
        }
    }
}

impl Theme {
    /// Blend `color` toward `bg` by `opacity` (1.0 = fully `color`)
    ///
    /// Terminal cells have no alpha channel, so derived opacities from the
    /// card transforms and dot springs become straight RGB blends.
    pub fn fade(color: Color, bg: Color, opacity: f64) -> Color {
        let t = opacity.clamp(0.0, 1.0);
        let (cr, cg, cb) = rgb_of(color);
        let (br, bg_, bb) = rgb_of(bg);
        let mix = |c: u8, b: u8| -> u8 {
            (f64::from(b) + (f64::from(c) - f64::from(b)) * t).round() as u8
        };
        Color::Rgb(mix(cr, br), mix(cg, bg_), mix(cb, bb))
    }
}

fn rgb_of(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        // Non-RGB colors cannot be blended; treat as opaque white
        _ => (0xff, 0xff, 0xff),
    }
}

/// Parse a hex color string ("#52fb03" or "52fb03")
fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn apply_override(slot: &mut Color, value: &Option<String>, name: &str) {
    if let Some(s) = value {
        match parse_hex(s) {
            Some(color) => *slot = color,
            None => warn!("Invalid hex color for '{}': '{}', keeping default", name, s),
        }
    }
}

/// Build the runtime theme from configuration
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let mut theme = match config.name.as_str() {
        "midnight" => Theme::default(),
        other => {
            warn!("Unknown theme '{}', falling back to midnight", other);
            Theme::default()
        }
    };

    let ThemeColorOverrides {
        bg0,
        bg1,
        bg2,
        fg0,
        fg1,
        outline,
        accent,
        dot_active,
        dot_inactive,
        error,
    } = &config.colors;

    apply_override(&mut theme.bg0, bg0, "bg0");
    apply_override(&mut theme.bg1, bg1, "bg1");
    apply_override(&mut theme.bg2, bg2, "bg2");
    apply_override(&mut theme.fg0, fg0, "fg0");
    apply_override(&mut theme.fg1, fg1, "fg1");
    apply_override(&mut theme.outline, outline, "outline");
    apply_override(&mut theme.accent, accent, "accent");
    apply_override(&mut theme.dot_active, dot_active, "dot_active");
    apply_override(&mut theme.dot_inactive, dot_inactive, "dot_inactive");
    apply_override(&mut theme.error, error, "error");

    theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#52fb03"), Some(Color::Rgb(0x52, 0xfb, 0x03)));
        assert_eq!(parse_hex("ffffff"), Some(Color::Rgb(0xff, 0xff, 0xff)));
        assert_eq!(parse_hex("zzz"), None);
        assert_eq!(parse_hex("#1234"), None);
    }

    #[test]
    fn test_fade_endpoints() {
        let color = Color::Rgb(200, 100, 50);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(Theme::fade(color, bg, 1.0), color);
        assert_eq!(Theme::fade(color, bg, 0.0), bg);
        assert_eq!(Theme::fade(color, bg, 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_overrides_applied() {
        let config = ThemeConfig {
            name: "midnight".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#ff0000".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert_eq!(theme.accent, Color::Rgb(0xff, 0, 0));
        assert_eq!(theme.bg0, Theme::default().bg0);
    }

    #[test]
    fn test_bad_override_keeps_default() {
        let config = ThemeConfig {
            name: "midnight".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("nope".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert_eq!(theme.accent, Theme::default().accent);
    }
}
