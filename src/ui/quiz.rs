//! Quiz screen: generated questions, option selection and score

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use textwrap::{Options, core::display_width, wrap};

use super::layout::{draw_status, view_block};
use crate::api::Choice;
use crate::theme::Theme;
use crate::views::{Load, QuizView};

/// Height of the score/hint footer in lines
const FOOTER_HEIGHT: u16 = 2;

/// Draw the quiz view
pub fn draw(frame: &mut Frame, area: Rect, view: &mut QuizView, theme: &Theme) {
    let block = view_block(format!(" {} ", view.heading()), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &view.questions {
        Load::Loading => return draw_status(frame, inner, QuizView::LOADING, false, theme),
        Load::Failed(message) => return draw_status(frame, inner, message, true, theme),
        Load::Ready(_) => {}
    }

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)]).areas(inner);

    if view.question_count() == 0 {
        draw_status(frame, body_area, "No questions in this test.", false, theme);
    } else {
        let (lines, spans) = question_lines(view, body_area.width as usize, theme);

        view.scroll.total_lines = lines.len();
        view.scroll.visible_height = body_area.height as usize;
        // Show the whole current question when it fits, else its start
        if let Some(&(start, end)) = spans.get(view.current) {
            view.scroll.reveal(end.saturating_sub(1));
            view.scroll.reveal(start);
        }
        view.scroll.clamp();

        let visible: Vec<Line> = lines
            .into_iter()
            .skip(view.scroll.offset)
            .take(body_area.height as usize)
            .collect();
        frame.render_widget(Paragraph::new(visible), body_area);
    }

    draw_footer(frame, footer_area, view, theme);
}

/// Lines for all questions plus each question's `[start, end)` line range
pub fn question_lines(
    view: &QuizView,
    width: usize,
    theme: &Theme,
) -> (Vec<Line<'static>>, Vec<(usize, usize)>) {
    let Some(questions) = view.questions.ready() else {
        return (Vec::new(), Vec::new());
    };

    let mut lines = Vec::new();
    let mut spans = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        let start = lines.len();
        let is_current = index == view.current;
        let chosen = view.answers.get(index);

        let number_style = if is_current {
            Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        };
        let text_style = Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD);

        let prefix = format!("Q{}.", index + 1);
        let text_width = width.saturating_sub(prefix.len() + 1).max(1);
        let mut text = wrap(&question.question, Options::new(text_width)).into_iter();

        let first = text.next().map(|c| c.into_owned()).unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(prefix.clone(), number_style),
            Span::raw(" "),
            Span::styled(first, text_style),
        ]));
        let indent = " ".repeat(prefix.len() + 1);
        for rest in text {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(rest.into_owned(), text_style),
            ]));
        }

        for choice in Choice::ALL {
            lines.extend(option_lines(
                question.option(choice),
                choice,
                chosen == Some(choice),
                width,
                theme,
            ));
        }

        lines.push(Line::from(""));
        spans.push((start, lines.len()));
    }

    (lines, spans)
}

/// One option, wrapped so continuation lines sit under the option text
fn option_lines(
    text: &str,
    choice: Choice,
    selected: bool,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let (marker, style) = if selected {
        ("\u{25CF}", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)) // ●
    } else {
        ("\u{25CB}", Style::default().fg(theme.fg_primary)) // ○
    };

    let prefix = format!("   {} {}) ", marker, choice);
    let indent = " ".repeat(display_width(&prefix));
    let text_width = width.saturating_sub(indent.len()).max(1);

    let mut pieces = wrap(text, Options::new(text_width)).into_iter();
    let first = pieces.next().map(|c| c.into_owned()).unwrap_or_default();

    let mut lines = vec![Line::from(Span::styled(format!("{}{}", prefix, first), style))];
    lines.extend(
        pieces.map(|piece| Line::from(Span::styled(format!("{}{}", indent, piece), style))),
    );
    lines
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &QuizView, theme: &Theme) {
    let mut lines = Vec::new();

    let mut status = vec![Span::styled(
        format!("Answered {}/{}", view.answers.answered(), view.question_count()),
        Style::default().fg(theme.fg_muted),
    )];
    if let Some(score) = view.score_line() {
        status.push(Span::raw("   "));
        status.push(Span::styled(
            score,
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(status));

    lines.push(Line::from(Span::styled(
        "[a-d] Select    [j/k] Question    [Enter] Submit    [Esc] Back",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Question, UnitId};
    use crate::ui::layout::line_text;
    use crate::ui::test_support::render_text;

    fn question(text: &str, correct: &str) -> Question {
        Question {
            question: text.into(),
            option_a: "Alpha".into(),
            option_b: "Bravo".into(),
            option_c: "Charlie".into(),
            option_d: "Delta".into(),
            correct_answer: correct.into(),
        }
    }

    fn loaded(questions: Vec<Question>) -> QuizView {
        let mut view = QuizView::new(UnitId(3));
        view.apply(Ok(questions));
        view
    }

    fn render(view: &mut QuizView) -> String {
        render_text(70, 24, |frame| {
            let area = frame.area();
            draw(frame, area, view, &Theme::default())
        })
    }

    #[test]
    fn each_question_has_four_options() {
        let view = loaded(vec![question("First?", "A"), question("Second?", "B")]);
        let (lines, spans) = question_lines(&view, 60, &Theme::default());
        assert_eq!(spans, vec![(0, 6), (6, 12)]);
        assert_eq!(line_text(&lines[0]), "Q1. First?");
        assert_eq!(line_text(&lines[4]), "   \u{25CB} D) Delta");
    }

    #[test]
    fn selected_option_is_marked() {
        let mut view = loaded(vec![question("First?", "A")]);
        view.toggle(Choice::C);
        let (lines, _) = question_lines(&view, 60, &Theme::default());
        assert_eq!(line_text(&lines[3]), "   \u{25CF} C) Charlie");
        assert_eq!(line_text(&lines[1]), "   \u{25CB} A) Alpha");
    }

    #[test]
    fn long_question_wraps_under_number() {
        let view = loaded(vec![question("one two three four five six", "A")]);
        let (lines, spans) = question_lines(&view, 14, &Theme::default());
        assert!(spans[0].1 > 6);
        assert!(line_text(&lines[1]).starts_with("    "));
    }

    #[test]
    fn long_option_wraps_under_option_text() {
        let mut q = question("Where?", "A");
        q.option_a = "They are the site of oxidative phosphorylation and contain their own \
                      circular genome ENDMARK"
            .into();
        let view = loaded(vec![q]);
        let (lines, spans) = question_lines(&view, 40, &Theme::default());

        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert!(texts[1].starts_with("   \u{25CB} A) They"));
        assert!(texts[2].starts_with("        ") && !texts[2].trim().is_empty());
        assert!(texts.iter().all(|t| display_width(t) <= 40));
        assert!(texts.iter().any(|t| t.contains("ENDMARK")));
        // Range still covers the whole question, options and trailing blank
        assert_eq!(spans[0], (0, texts.len()));
        assert_eq!(texts.last().map(String::as_str), Some(""));
    }

    #[test]
    fn long_option_tail_is_rendered() {
        let mut q = question("Where?", "A");
        q.option_a = "They are the site of oxidative phosphorylation and contain their own \
                      circular genome ENDMARK"
            .into();
        let mut view = loaded(vec![q]);
        let text = render_text(80, 20, |frame| {
            let area = frame.area();
            draw(frame, area, &mut view, &Theme::default())
        });
        assert!(text.contains("ENDMARK"));
    }

    #[test]
    fn score_shows_after_submit() {
        let mut view = loaded(vec![question("First?", "A"), question("Second?", "B")]);
        view.toggle(Choice::A);
        assert!(!render(&mut view).contains("Your score"));

        view.submit();
        assert!(render(&mut view).contains("Your score: 1 / 2"));
    }

    #[test]
    fn missing_questions_renders_error_only() {
        let mut view = QuizView::new(UnitId(3));
        view.apply(Err(ApiError::MissingQuestions { detail: None }));
        let text = render(&mut view);
        assert!(text.contains(QuizView::NO_QUESTIONS));
        assert!(!text.contains("Submit"));
    }

    #[test]
    fn loading_renders_message() {
        let mut view = QuizView::new(UnitId(3));
        assert!(render(&mut view).contains(QuizView::LOADING));
    }

    #[test]
    fn current_question_scrolls_into_view() {
        let questions = (0..10).map(|i| question(&format!("Question {}", i), "A")).collect();
        let mut view = loaded(questions);
        view.last_question();
        let text = render(&mut view);
        assert!(text.contains("Q10."));
        assert!(view.scroll.offset > 0);
    }
}
