use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let mode_str = match app.mode {
            Mode::Normal => {
                if app.engine.looping() {
                    "NORMAL"
                } else {
                    "NORMAL [no loop]"
                }
            }
            Mode::Help => "HELP",
        };

        let position = format!(
            "Card {}/{}",
            app.engine.current_index() + 1,
            app.deck.len()
        );

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            format!(" {} | {} | {}", mode_str, position, app.active_card().owner.name)
        };

        let help_hint = " q:quit j/k:swipe gg/G:ends L:loop ?:help ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let theme = &app.theme;
        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.fg1).bg(theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
