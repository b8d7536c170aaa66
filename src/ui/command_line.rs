//! Command line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{CommandLineState, CommandMode};
use crate::theme::Theme;

/// Draw the command line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &CommandLineState, theme: &Theme) {
    let line = match state.mode {
        CommandMode::Normal => {
            let (text, style) = match &state.message {
                Some(msg) if state.is_error => (msg.clone(), Style::default().fg(theme.error)),
                Some(msg) => (msg.clone(), Style::default().fg(theme.info)),
                None => (
                    String::from("Press : for commands, ? for help"),
                    Style::default().fg(theme.fg_muted),
                ),
            };
            Line::from(Span::styled(text, style))
        }
        CommandMode::Command => {
            let text = format!(":{}", state.input);
            // +1 for the ':' prefix
            build_line_with_cursor(&text, state.cursor + 1, Style::default().fg(theme.accent_primary), theme)
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg_primary)), area);
}

/// Build a line with a visible block cursor at `cursor_pos` (characters)
fn build_line_with_cursor(
    text: &str,
    cursor_pos: usize,
    base_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.fg_primary).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}
