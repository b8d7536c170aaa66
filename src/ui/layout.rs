//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::route::Route;
use crate::theme::Theme;

/// Draw the top navigation bar: app name, current view, current path
pub fn draw_header(frame: &mut Frame, area: Rect, route: Route, theme: &Theme) {
    let section = match route.resolve() {
        Route::Root | Route::Student => "Units",
        Route::Chapter(_) => "Chapter",
        Route::Mcq(_) => "Quiz",
    };

    let left = Line::from(vec![
        Span::styled(
            " chapterdesk ",
            Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", section), Style::default().fg(theme.fg_secondary)),
    ]);
    let right = Line::from(Span::styled(format!("{} ", route.path()), Style::default().fg(theme.fg_muted)))
        .alignment(Alignment::Right);

    let style = Style::default().bg(theme.bg_secondary);
    frame.render_widget(Paragraph::new(left).style(style), area);
    frame.render_widget(Paragraph::new(right).style(style), area);
}

/// Bordered block used by every view
pub fn view_block<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary))
}

/// Draw a loading or error message in place of a view's content
pub fn draw_status(frame: &mut Frame, area: Rect, message: &str, is_error: bool, theme: &Theme) {
    let style = if is_error {
        Style::default().fg(theme.error).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_muted)
    };

    let text = vec![Line::from(""), Line::from(Span::styled(message.to_string(), style))];
    let para = Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Plain text of a rendered line
pub fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
