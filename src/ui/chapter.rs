//! Chapter screen: paginated unit content with quiz and speech actions

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use textwrap::{Options, core::display_width, wrap};

use super::layout::{draw_status, view_block};
use crate::api::Page;
use crate::theme::Theme;
use crate::views::{ChapterView, Load};

/// Height of the action footer in lines
pub const FOOTER_HEIGHT: u16 = 3;

/// Draw the chapter view
pub fn draw(frame: &mut Frame, area: Rect, view: &mut ChapterView, theme: &Theme) {
    let block = view_block(format!(" {} ", view.heading()), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let pages = match &view.pages {
        Load::Loading => return draw_status(frame, inner, ChapterView::LOADING, false, theme),
        Load::Failed(message) => return draw_status(frame, inner, message, true, theme),
        Load::Ready(pages) => pages,
    };

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)]).areas(inner);

    let lines = page_lines(pages, content_area.width as usize, theme);

    // Update scroll metrics for key handling
    view.scroll.total_lines = lines.len();
    view.scroll.visible_height = content_area.height as usize;
    view.scroll.clamp();

    let offset = view.scroll.offset;
    let visible: Vec<Line> =
        lines.into_iter().skip(offset).take(content_area.height as usize).collect();
    frame.render_widget(Paragraph::new(visible), content_area);

    draw_footer(frame, footer_area, theme);
}

/// Rendered lines for every page, in the order given
///
/// Content lines are kept verbatim; only lines wider than `width` are
/// soft-wrapped.
pub fn page_lines(pages: &[Page], width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let heading = Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD);
    let body = Style::default().fg(theme.fg_primary);

    let mut lines = Vec::new();
    for page in pages {
        lines.push(Line::from(Span::styled(format!("Page {}", page.page_number), heading)));

        for raw in page.content.split('\n') {
            if width == 0 || display_width(raw) <= width {
                lines.push(Line::from(Span::styled(raw.to_string(), body)));
            } else {
                for piece in wrap(raw, Options::new(width)) {
                    lines.push(Line::from(Span::styled(piece.into_owned(), body)));
                }
            }
        }

        lines.push(Line::from(""));
    }
    lines
}

/// Draw the action buttons under the content
fn draw_footer(frame: &mut Frame, area: Rect, theme: &Theme) {
    if area.height < FOOTER_HEIGHT {
        return;
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize), // ─
        Style::default().fg(theme.border),
    ));
    frame.render_widget(Paragraph::new(separator), Rect::new(area.x, area.y, area.width, 1));

    let buttons = Line::from(vec![
        button(" [m] Generate MCQ Test ", theme),
        Span::raw("    "),
        button(" [s] Play Text to Speech ", theme),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(buttons), Rect::new(area.x, area.y + 1, area.width, 1));

    let hint = Line::from(vec![
        Span::styled("[j/k]", Style::default().fg(theme.fg_muted)),
        Span::styled(" scroll  ", Style::default().fg(theme.fg_secondary)),
        Span::styled("[Esc]", Style::default().fg(theme.fg_muted)),
        Span::styled(" back", Style::default().fg(theme.fg_secondary)),
    ]);
    frame.render_widget(Paragraph::new(hint), Rect::new(area.x, area.y + 2, area.width, 1));
}

fn button(text: &'static str, theme: &Theme) -> Span<'static> {
    Span::styled(text, Style::default().fg(theme.fg_secondary).bg(theme.bg_tertiary))
}
