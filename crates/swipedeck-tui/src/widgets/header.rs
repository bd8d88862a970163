use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use ratatui_image::StatefulImage;
use unicode_width::UnicodeWidthStr;

use crate::app::App;

/// Current-user avatar shown top-left
pub const PROFILE_AVATAR_URL: &str = "https://i.pravatar.cc/100?u=me";
/// Group icon shown above the center badge
pub const GROUP_ICON_URL: &str = "https://i.pravatar.cc/100?u=group";

/// Label on the center group badge
const BADGE_LABEL: &str = "XOXO";

/// Fixed header over the card stack: profile avatar, group badge,
/// notification affordance
///
/// All three targets are intentionally inert; they are presentation only.
pub struct HeaderWidget;

impl HeaderWidget {
    /// Rows the header occupies
    pub const HEIGHT: u16 = 4;

    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        if area.width < 20 || area.height < Self::HEIGHT {
            return;
        }
        let theme = app.theme.clone();

        // Left: profile avatar (image when loaded, glyph fallback)
        let avatar_rect = Rect::new(area.x + 2, area.y + 1, 4, 2);
        let mut avatar_drawn = false;
        if app.config.ui.image_preview {
            if let Some(cached) = app.images.get_mut(PROFILE_AVATAR_URL) {
                frame.render_stateful_widget(
                    StatefulImage::new(None),
                    avatar_rect,
                    cached.protocol(),
                );
                avatar_drawn = true;
            }
        }
        if !avatar_drawn {
            frame.render_widget(
                Paragraph::new(Line::styled("(·)", Style::default().fg(theme.fg1))),
                avatar_rect,
            );
        }

        // Center: group icon above a pill badge with label and chevron
        let icon_rect = Rect::new(area.x + area.width / 2 - 1, area.y, 3, 1);
        frame.render_widget(
            Paragraph::new(Line::styled("▣", Style::default().fg(theme.fg1)).centered()),
            icon_rect,
        );

        let badge = format!(" {} ❯ ", BADGE_LABEL);
        let badge_width = badge.width() as u16;
        let badge_rect = Rect::new(
            area.x + (area.width.saturating_sub(badge_width)) / 2,
            area.y + 1,
            badge_width,
            1,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                badge,
                Style::default()
                    .fg(theme.fg0)
                    .bg(theme.bg1)
                    .add_modifier(Modifier::BOLD),
            ))),
            badge_rect,
        );

        // Right: circular notification affordance
        let bell = " 🔔 ";
        let bell_width = bell.width() as u16;
        let bell_rect = Rect::new(
            area.x + area.width.saturating_sub(bell_width + 2),
            area.y + 1,
            bell_width,
            1,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                bell,
                Style::default().fg(theme.fg0).bg(theme.bg1),
            ))),
            bell_rect,
        );
    }
}
