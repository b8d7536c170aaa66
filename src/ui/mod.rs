//! UI rendering components

pub mod chapter;
pub mod command_line;
pub mod help;
pub mod layout;
pub mod quiz;
pub mod unit_list;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use crate::app::state::{AppState, View};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [header_area, body_area, command_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    layout::draw_header(frame, header_area, state.router.current(), theme);

    match &mut state.view {
        View::Units(view) => unit_list::draw(frame, body_area, view, theme),
        View::Chapter(view) => chapter::draw(frame, body_area, view, theme),
        View::Quiz(view) => quiz::draw(frame, body_area, view, theme),
    }

    command_line::draw(frame, command_area, &state.command_line, theme);

    if state.show_help {
        help::draw(frame, area, theme);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Frame, Terminal, backend::TestBackend};

    /// Render into an off-screen buffer and return its text, one row per line
    pub fn render_text(width: u16, height: u16, f: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut f = Some(f);
        terminal
            .draw(|frame| {
                if let Some(f) = f.take() {
                    f(frame);
                }
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..height {
            for x in 0..width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
