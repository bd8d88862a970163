use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use ratatui_image::StatefulImage;
use unicode_width::UnicodeWidthStr;

use crate::app::App;

/// Ringed avatar shown in the footer
pub const CURRENT_USER_AVATAR_URL: &str = "https://i.pravatar.cc/150?u=current";

/// Fixed footer over the card stack: ringed current-user avatar above a
/// pill-shaped secondary action
///
/// Like the header, both affordances are inert presentation.
pub struct FooterWidget;

impl FooterWidget {
    /// Rows the footer occupies
    pub const HEIGHT: u16 = 7;

    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        if area.width < 14 || area.height < Self::HEIGHT {
            return;
        }
        let theme = app.theme.clone();

        // Ringed avatar: accent border stands in for the highlight ring
        let ring_width: u16 = 10;
        let ring = Rect::new(
            area.x + (area.width - ring_width) / 2,
            area.y,
            ring_width,
            4,
        );
        let ring_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(theme.bg0));
        let inner = ring_block.inner(ring);
        frame.render_widget(ring_block, ring);

        let mut avatar_drawn = false;
        if app.config.ui.image_preview {
            if let Some(cached) = app.images.get_mut(CURRENT_USER_AVATAR_URL) {
                frame.render_stateful_widget(StatefulImage::new(None), inner, cached.protocol());
                avatar_drawn = true;
            }
        }
        if !avatar_drawn {
            frame.render_widget(
                Paragraph::new(Line::styled("·", Style::default().fg(theme.fg1)).centered()),
                Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1),
            );
        }

        // Secondary action pill below the ring
        let pill = "  🌐  ";
        let pill_width = pill.width() as u16;
        let pill_rect = Rect::new(
            area.x + (area.width.saturating_sub(pill_width)) / 2,
            area.y + 5,
            pill_width,
            1,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                pill,
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ))),
            pill_rect,
        );
    }
}
