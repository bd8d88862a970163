use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::carousel::pagination::ACTIVE_WIDTH;
use crate::theme::Theme;

/// Cells per point of dot width; maps the 4..10 point range onto 1..3 cells
const CELLS_PER_PT: f64 = 3.5;

/// Vertical dot column hugging the right edge of the carousel
///
/// One row per dot with a blank row between. Width and opacity come straight
/// from the dot springs, so the handoff between dots eases over a few frames
/// instead of snapping.
pub struct PaginationWidget;

impl PaginationWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let states = app.dots.states();
        if states.is_empty() {
            return;
        }

        let max_cells = Self::width_cells(ACTIVE_WIDTH);
        let total_rows = (states.len() * 2 - 1) as u16;
        if area.height < total_rows || area.width < max_cells + 2 {
            return;
        }

        let top = area.y + (area.height - total_rows) / 2;
        let theme = &app.theme;

        for (i, dot) in states.iter().enumerate() {
            let cells = Self::width_cells(dot.width);
            let color = if dot.active {
                theme.dot_active
            } else {
                theme.dot_inactive
            };
            let faded = Theme::fade(color, theme.bg0, dot.opacity);

            // Right-aligned so growth extends leftward, like the source pills
            let x = area.x + area.width - 2 - cells;
            let rect = Rect::new(x, top + (i as u16) * 2, cells, 1);
            let bar = "▬".repeat(usize::from(cells));
            frame.render_widget(
                Paragraph::new(Line::styled(bar, Style::default().fg(faded))),
                rect,
            );
        }
    }

    fn width_cells(width_pt: f64) -> u16 {
        let cells = (width_pt / CELLS_PER_PT).round() as u16;
        cells.clamp(1, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::pagination::INACTIVE_WIDTH;

    #[test]
    fn test_width_mapping() {
        assert_eq!(PaginationWidget::width_cells(INACTIVE_WIDTH), 1);
        assert_eq!(PaginationWidget::width_cells(ACTIVE_WIDTH), 3);
        // Mid-animation widths land in between
        assert_eq!(PaginationWidget::width_cells(7.0), 2);
    }
}
