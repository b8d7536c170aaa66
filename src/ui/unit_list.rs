//! Unit list screen

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::{draw_status, view_block};
use crate::app::route::Route;
use crate::theme::Theme;
use crate::views::{Load, UnitListView};

/// Draw the list of available units
pub fn draw(frame: &mut Frame, area: Rect, view: &UnitListView, theme: &Theme) {
    let block = view_block(format!(" {} ", UnitListView::HEADING), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let units = match &view.units {
        Load::Loading => return draw_status(frame, inner, UnitListView::LOADING, false, theme),
        Load::Failed(message) => return draw_status(frame, inner, message, true, theme),
        Load::Ready(units) => units,
    };

    if units.is_empty() {
        return draw_status(frame, inner, UnitListView::EMPTY, false, theme);
    }

    let lines = unit_lines(view, theme);

    // Keep the selection on screen
    let height = inner.height as usize;
    let offset = if height == 0 { 0 } else { view.selected.saturating_sub(height - 1) };
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();

    frame.render_widget(Paragraph::new(visible), inner);
}

/// One link line per unit
pub fn unit_lines(view: &UnitListView, theme: &Theme) -> Vec<Line<'static>> {
    let Some(units) = view.units.ready() else {
        return Vec::new();
    };

    units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let selected = i == view.selected;
            let (marker, title_style) = if selected {
                (
                    "\u{25B6} ", // ▶
                    Style::default()
                        .fg(theme.bg_primary)
                        .bg(theme.accent_primary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(theme.fg_primary).add_modifier(Modifier::UNDERLINED))
            };

            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent_primary)),
                Span::styled(unit.title.clone(), title_style),
                Span::styled(
                    format!("  {}", Route::Chapter(unit.unit_id).path()),
                    Style::default().fg(theme.fg_muted),
                ),
            ])
        })
        .collect()
}
