use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use swipedeck_core::config::KeymapConfig;

use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the help overlay on top of the card stack
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let size = frame.area();
        let width = 44u16.min(size.width.saturating_sub(4));
        let height = 12u16.min(size.height.saturating_sub(2));
        if width < 20 || height < 6 {
            return;
        }

        let area = Rect::new(
            (size.width - width) / 2,
            (size.height - height) / 2,
            width,
            height,
        );

        let rows = [
            (keymap.next_card.as_str(), "swipe to next card"),
            (keymap.prev_card.as_str(), "swipe to previous card"),
            (keymap.first_card.as_str(), "jump to first card"),
            (keymap.last_card.as_str(), "jump to last card"),
            (keymap.toggle_looping.as_str(), "toggle looping"),
            (keymap.help.as_str(), "toggle this help"),
            (keymap.quit.as_str(), "quit"),
            ("mouse drag", "swipe"),
        ];

        let lines: Vec<Line> = rows
            .iter()
            .map(|(key, action)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<12}", key),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*action, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
