//! Key binding overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::layout::centered_rect;
use crate::theme::Theme;

/// (keys, description) grouped by heading
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Everywhere",
        &[
            ("j/k", "move down / up"),
            ("g/G", "top / bottom"),
            ("Esc", "back"),
            ("r", "reload view"),
            (":", "command line"),
            ("q", "quit"),
        ],
    ),
    ("Units", &[("Enter", "open chapter")]),
    ("Chapter", &[("m", "take MCQ test"), ("s", "play text to speech")]),
    (
        "Quiz",
        &[("a-d / 1-4", "choose option (again to clear)"), ("x", "clear answer"), ("Enter", "submit")],
    ),
    (
        "Commands",
        &[
            (":open <path>", "go to /student, /chapter/<id>, /mcq/<id>"),
            (":back :home :reload", "navigation"),
            (":quiz :speak :submit", "view actions"),
            (":q", "quit"),
        ],
    ),
];

/// Draw the help overlay
pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = Vec::new();
    for (heading, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(
            *heading,
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )));
        for (keys, description) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<22}", keys), Style::default().fg(theme.accent_primary)),
                Span::styled(*description, Style::default().fg(theme.fg_secondary)),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("Press any key to close", Style::default().fg(theme.fg_muted))));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
