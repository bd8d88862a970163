use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use ratatui_image::StatefulImage;

use crate::app::App;
use crate::carousel::transform;
use crate::theme::Theme;

/// Points per terminal row, used to map the transform's point values onto
/// cell rows
const PT_PER_ROW: f64 = 16.0;

/// Renders the deck as a stack of receding cards
///
/// Each card's rect is derived from its transform: scale shrinks the tile,
/// translate pushes it down (or fully above the viewport while scrolling
/// out), and stacking order decides paint order so nearer cards overdraw
/// farther ones. Opacity becomes a blend toward the background since cells
/// have no alpha.
pub struct CardStackWidget;

struct StackEntry {
    index: usize,
    rect: Rect,
    offset: f64,
    opacity: f64,
    z_index: i32,
}

impl CardStackWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        if area.width < 10 || area.height < 6 {
            return;
        }

        let viewport_pt = f64::from(area.height) * PT_PER_ROW;

        // Base tile: 80% of the width, kept visually square (cells are
        // roughly twice as tall as wide), biased up to clear the footer
        let base_cols = area.width * 8 / 10;
        let base_rows = (base_cols / 2).min(area.height * 6 / 10).max(4);
        let bias_rows = i32::from(area.height / 12);

        let mut entries: Vec<StackEntry> = (0..app.deck.len())
            .filter_map(|index| {
                let offset = app.engine.offset_of(index);
                let t = transform(offset, viewport_pt);

                let cols = ((f64::from(base_cols) * t.scale).round() as u16).max(4);
                let rows = ((f64::from(base_rows) * t.scale).round() as u16).max(3);
                let translate_rows = (t.translate_y / PT_PER_ROW).round() as i32;

                let x = area.x + (area.width.saturating_sub(cols)) / 2;
                let top = i32::from(area.y)
                    + i32::from(area.height.saturating_sub(rows) / 2)
                    + translate_rows
                    - bias_rows;

                // Clip vertically; a card sliding out keeps its visible tail
                let bottom = top + i32::from(rows);
                let visible_top = top.max(i32::from(area.y));
                let visible_bottom = bottom.min(i32::from(area.y + area.height));
                if visible_bottom <= visible_top {
                    return None;
                }

                let rect = Rect::new(
                    x,
                    visible_top as u16,
                    cols,
                    (visible_bottom - visible_top) as u16,
                );
                Some(StackEntry {
                    index,
                    rect,
                    offset,
                    opacity: t.opacity,
                    z_index: t.z_index,
                })
            })
            .collect();

        // Farther cards first so nearer ones overdraw them; ties in the
        // clamped tail of the z track still order by nearness
        entries.sort_by(|a, b| {
            a.z_index.cmp(&b.z_index).then(
                b.offset
                    .partial_cmp(&a.offset)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });

        let now = Instant::now();
        for entry in entries {
            Self::render_card(frame, app, &entry, now);
        }
    }

    fn render_card(frame: &mut Frame, app: &mut App, entry: &StackEntry, now: Instant) {
        let theme = app.theme.clone();
        let Some(card) = app.deck.get(entry.index) else {
            return;
        };
        let url = card.image_url.clone();
        let owner = card.owner.name.clone();

        let reveal = app.images.get_mut(&url).map_or(1.0, |img| img.reveal(now));
        let chrome_alpha = entry.opacity * reveal;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::fade(theme.fg1, theme.bg0, chrome_alpha)))
            .title_bottom(
                Line::styled(
                    format!(" {} ", owner),
                    Style::default()
                        .fg(Theme::fade(theme.fg0, theme.bg0, chrome_alpha))
                        .add_modifier(Modifier::BOLD),
                )
                .centered(),
            )
            .style(Style::default().bg(Theme::fade(theme.bg1, theme.bg0, entry.opacity)));

        let inner = block.inner(entry.rect);
        frame.render_widget(block, entry.rect);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let show_images = app.config.ui.image_preview;
        if show_images {
            if let Some(cached) = app.images.get_mut(&url) {
                frame.render_stateful_widget(StatefulImage::new(None), inner, cached.protocol());
                return;
            }
        }

        // Placeholder tile until the image collaborator delivers (or forever,
        // if it failed; the carousel takes no recovery action)
        let message = app
            .images
            .status(&url)
            .unwrap_or_else(|| "·".to_string());
        let style = if app.images.is_failed(&url) {
            Style::default().fg(Theme::fade(theme.error, theme.bg0, entry.opacity))
        } else {
            Style::default().fg(Theme::fade(theme.fg1, theme.bg0, entry.opacity))
        };

        let placeholder_y = inner.y + inner.height / 2;
        let line_area = Rect::new(inner.x, placeholder_y, inner.width, 1);
        frame.render_widget(
            Paragraph::new(Line::styled(message, style).centered()),
            line_area,
        );
    }
}
