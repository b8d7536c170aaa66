//! Application state definitions

use crossterm::event::{KeyCode, KeyModifiers};

use super::command::{Command, ParseResult, parse_command};
use super::fetch::{FetchOutcome, FetchRequest, Fetched, Ticket};
use super::input::{Action, key_to_action};
use super::route::{Route, Router};
use crate::views::{ChapterView, QuizView, UnitListView};

/// Which kind of view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Units,
    Chapter,
    Quiz,
}

/// The mounted view and its data
#[derive(Debug, Clone)]
pub enum View {
    Units(UnitListView),
    Chapter(ChapterView),
    Quiz(QuizView),
}

impl Default for View {
    fn default() -> Self {
        View::Units(UnitListView::default())
    }
}

impl View {
    /// Fresh, loading view for `route`
    pub fn for_route(route: Route) -> Self {
        match route.resolve() {
            Route::Chapter(id) => View::Chapter(ChapterView::new(id)),
            Route::Mcq(id) => View::Quiz(QuizView::new(id)),
            Route::Root | Route::Student => View::Units(UnitListView::default()),
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            View::Units(_) => ViewKind::Units,
            View::Chapter(_) => ViewKind::Chapter,
            View::Quiz(_) => ViewKind::Quiz,
        }
    }
}

/// Request the app loop must start after a view was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mount {
    pub ticket: Ticket,
    pub request: FetchRequest,
}

/// Side effect requested by input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Mount(Mount),
    /// Read this text aloud
    Speak(String),
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Command line shows status or a hint
    #[default]
    Normal,
    /// Accepting : commands
    Command,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input (characters)
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 1000;

    /// Start command mode
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode == CommandMode::Command
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Add to history, skipping blanks and repeats
    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.trim().is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    /// Navigate history up
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_index = Some(index);
        self.input = self.history[index].clone();
        self.cursor = self.char_count();
    }

    /// Navigate history down
    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input = self.history[i + 1].clone();
                self.cursor = self.char_count();
            } else {
                self.history_index = None;
                self.input.clear();
                self.cursor = 0;
            }
        }
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current route and history
    pub router: Router,

    /// Mounted view
    pub view: View,

    /// Ticket of the current activation; results for older tickets are stale
    pub ticket: Ticket,

    /// Command line state
    pub command_line: CommandLineState,

    /// Help overlay visible
    pub show_help: bool,
}

impl AppState {
    /// Lines moved by half-page keys in the unit list
    const LIST_JUMP: usize = 10;

    /// State opened at `route`, with the request its view needs
    pub fn start(route: Route) -> (Self, Mount) {
        let mut state = Self { router: Router::new(route), ..Self::default() };
        let mount = state.mount();
        (state, mount)
    }

    /// Rebuild the view for the current route from scratch
    fn mount(&mut self) -> Mount {
        self.ticket += 1;
        let route = self.router.current();
        self.view = View::for_route(route);
        tracing::info!(path = %route, ticket = self.ticket, "view activated");
        Mount { ticket: self.ticket, request: FetchRequest::for_route(route) }
    }

    /// Navigate to `route`
    pub fn navigate(&mut self, route: Route) -> Mount {
        self.router.push(route);
        self.mount()
    }

    /// Return to the previous view
    pub fn back(&mut self) -> Mount {
        self.router.pop();
        self.mount()
    }

    /// Go to the unit list, forgetting history
    pub fn home(&mut self) -> Mount {
        self.router.reset(Route::Student);
        self.mount()
    }

    /// Re-activate the current view
    pub fn reload(&mut self) -> Mount {
        self.mount()
    }

    /// Apply a finished request; returns false when it was stale
    pub fn accept(&mut self, fetched: Fetched) -> bool {
        if fetched.ticket != self.ticket {
            tracing::debug!(ticket = fetched.ticket, current = self.ticket, "dropping stale response");
            return false;
        }

        match (&mut self.view, fetched.outcome) {
            (View::Units(view), FetchOutcome::Units(result)) => view.apply(result),
            (View::Chapter(view), FetchOutcome::Pages(result)) => view.apply(result),
            (View::Quiz(view), FetchOutcome::Questions(result)) => view.apply(result),
            (view, outcome) => {
                tracing::warn!(view = ?view.kind(), ?outcome, "response does not fit view");
                return false;
            }
        }
        true
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Effect {
        if self.show_help {
            self.show_help = false;
            return Effect::None;
        }

        if self.command_line.is_input_mode() {
            return self.handle_command_key(code);
        }

        match key_to_action(code, modifiers, self.view.kind()) {
            Some(action) => self.perform(action),
            None => Effect::None,
        }
    }

    fn handle_command_key(&mut self, code: KeyCode) -> Effect {
        let cl = &mut self.command_line;
        match code {
            KeyCode::Esc => cl.exit_input_mode(),
            KeyCode::Enter => {
                let input = std::mem::take(&mut cl.input);
                cl.add_to_history(input.clone());
                cl.exit_input_mode();
                return match parse_command(&input) {
                    ParseResult::Ok(command) => self.execute(command),
                    ParseResult::UnknownCommand(cmd) => {
                        self.command_line.set_error(format!("Unknown command: {}", cmd));
                        Effect::None
                    }
                    ParseResult::MissingArgument(cmd) => {
                        self.command_line.set_error(format!("Missing argument for :{}", cmd));
                        Effect::None
                    }
                };
            }
            KeyCode::Backspace if cl.input.is_empty() => cl.exit_input_mode(),
            KeyCode::Backspace => cl.delete_char(),
            KeyCode::Delete => cl.delete_char_forward(),
            KeyCode::Left => cl.move_left(),
            KeyCode::Right => cl.move_right(),
            KeyCode::Home => cl.move_start(),
            KeyCode::End => cl.move_end(),
            KeyCode::Up => cl.history_up(),
            KeyCode::Down => cl.history_down(),
            KeyCode::Char(c) => cl.insert_char(c),
            _ => {}
        }
        Effect::None
    }

    /// Run a parsed command
    pub fn execute(&mut self, command: Command) -> Effect {
        match command {
            Command::Quit => Effect::Quit,
            Command::Help => {
                self.show_help = true;
                Effect::None
            }
            Command::Open(path) => match Route::parse(&path) {
                Ok(route) => Effect::Mount(self.navigate(route)),
                Err(e) => {
                    self.command_line.set_error(e.to_string());
                    Effect::None
                }
            },
            Command::Back => Effect::Mount(self.back()),
            Command::Home => Effect::Mount(self.home()),
            Command::Reload => Effect::Mount(self.reload()),
            Command::Quiz => self.take_quiz(),
            Command::Speak => self.speak(),
            Command::Submit => self.submit(),
            Command::Nop => {
                self.command_line.clear_message();
                Effect::None
            }
        }
    }

    /// Perform a mapped key action
    pub fn perform(&mut self, action: Action) -> Effect {
        match action {
            Action::Quit => return Effect::Quit,
            Action::Command => self.command_line.enter_command_mode(),
            Action::Help => self.show_help = true,
            Action::Back => return Effect::Mount(self.back()),
            Action::Reload => return Effect::Mount(self.reload()),
            Action::TakeQuiz => return self.take_quiz(),
            Action::Speak => return self.speak(),
            Action::Submit => return self.submit(),
            Action::Select => {
                if let View::Units(view) = &self.view {
                    if let Some(route) = view.open_selected() {
                        return Effect::Mount(self.navigate(route));
                    }
                }
            }
            other => self.move_within_view(other),
        }
        Effect::None
    }

    fn move_within_view(&mut self, action: Action) {
        match &mut self.view {
            View::Units(view) => match action {
                Action::Down => view.select_next(),
                Action::Up => view.select_prev(),
                Action::Top => view.select_first(),
                Action::Bottom => view.select_last(),
                Action::PageDown | Action::HalfPageDown => {
                    (0..Self::LIST_JUMP).for_each(|_| view.select_next())
                }
                Action::PageUp | Action::HalfPageUp => {
                    (0..Self::LIST_JUMP).for_each(|_| view.select_prev())
                }
                _ => {}
            },
            View::Chapter(view) => {
                let scroll = &mut view.scroll;
                let page = scroll.page();
                match action {
                    Action::Down => scroll.scroll_down(1),
                    Action::Up => scroll.scroll_up(1),
                    Action::Top => scroll.to_top(),
                    Action::Bottom => scroll.to_bottom(),
                    Action::PageDown => scroll.scroll_down(page),
                    Action::PageUp => scroll.scroll_up(page),
                    Action::HalfPageDown => scroll.scroll_down((page / 2).max(1)),
                    Action::HalfPageUp => scroll.scroll_up((page / 2).max(1)),
                    _ => {}
                }
            }
            View::Quiz(view) => match action {
                Action::Down | Action::PageDown | Action::HalfPageDown => view.next_question(),
                Action::Up | Action::PageUp | Action::HalfPageUp => view.prev_question(),
                Action::Top => view.first_question(),
                Action::Bottom => view.last_question(),
                Action::Choose(choice) => view.toggle(choice),
                Action::ClearAnswer => view.clear_current(),
                _ => {}
            },
        }
    }

    fn take_quiz(&mut self) -> Effect {
        match &self.view {
            View::Chapter(view) => {
                let route = Route::Mcq(view.unit_id);
                Effect::Mount(self.navigate(route))
            }
            _ => {
                self.command_line.set_error("Open a chapter to take its quiz");
                Effect::None
            }
        }
    }

    fn speak(&mut self) -> Effect {
        match &self.view {
            View::Chapter(view) => view.speech_text().map_or(Effect::None, Effect::Speak),
            _ => {
                self.command_line.set_error("Open a chapter to read it aloud");
                Effect::None
            }
        }
    }

    fn submit(&mut self) -> Effect {
        match &mut self.view {
            View::Quiz(view) => {
                view.submit();
            }
            _ => self.command_line.set_error("No quiz to submit"),
        }
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Choice, Page, Question, Unit, UnitId};
    use pretty_assertions::assert_eq;

    fn key(state: &mut AppState, code: KeyCode) -> Effect {
        state.handle_key(code, KeyModifiers::NONE)
    }

    fn type_command(state: &mut AppState, text: &str) -> Effect {
        key(state, KeyCode::Char(':'));
        for c in text.chars() {
            key(state, KeyCode::Char(c));
        }
        key(state, KeyCode::Enter)
    }

    fn units(state: &AppState) -> &UnitListView {
        match &state.view {
            View::Units(view) => view,
            other => panic!("Expected unit list, got {:?}", other.kind()),
        }
    }

    fn quiz(state: &mut AppState) -> &mut QuizView {
        match &mut state.view {
            View::Quiz(view) => view,
            other => panic!("Expected quiz, got {:?}", other.kind()),
        }
    }

    fn questions() -> Vec<Question> {
        ["A", "B", "C"]
            .iter()
            .map(|c| Question { correct_answer: c.to_string(), ..Default::default() })
            .collect()
    }

    #[test]
    fn start_at_root_mounts_unit_list() {
        let (state, mount) = AppState::start(Route::Root);
        assert_eq!(mount, Mount { ticket: 1, request: FetchRequest::Units });
        assert_eq!(state.router.current(), Route::Student);
        assert!(units(&state).units.is_loading());
    }

    #[test]
    fn start_at_chapter_requests_pages() {
        let (state, mount) = AppState::start(Route::Chapter(UnitId(4)));
        assert_eq!(mount.request, FetchRequest::Pages(UnitId(4)));
        assert_eq!(state.view.kind(), ViewKind::Chapter);
    }

    #[test]
    fn enter_on_unit_opens_chapter() {
        let (mut state, mount) = AppState::start(Route::Student);
        state.accept(Fetched {
            ticket: mount.ticket,
            outcome: FetchOutcome::Units(Ok(vec![Unit::new(1, "One"), Unit::new(2, "Two")])),
        });

        key(&mut state, KeyCode::Char('j'));
        let effect = key(&mut state, KeyCode::Enter);

        assert_eq!(
            effect,
            Effect::Mount(Mount { ticket: 2, request: FetchRequest::Pages(UnitId(2)) })
        );
        assert_eq!(state.router.current(), Route::Chapter(UnitId(2)));
    }

    #[test]
    fn stale_response_is_dropped() {
        let (mut state, first) = AppState::start(Route::Student);
        state.navigate(Route::Chapter(UnitId(1)));

        let applied = state.accept(Fetched {
            ticket: first.ticket,
            outcome: FetchOutcome::Units(Ok(vec![Unit::new(1, "One")])),
        });

        assert!(!applied);
        match &state.view {
            View::Chapter(view) => assert!(view.pages.is_loading()),
            other => panic!("Expected chapter, got {:?}", other.kind()),
        }
    }

    #[test]
    fn failures_show_fixed_messages_on_every_view() {
        let failure = || ApiError::ApiError { status: 500, message: "boom".into() };

        let (mut state, m) = AppState::start(Route::Student);
        state.accept(Fetched { ticket: m.ticket, outcome: FetchOutcome::Units(Err(failure())) });
        assert_eq!(units(&state).units.error(), Some(UnitListView::FAILED));

        let m = state.navigate(Route::Chapter(UnitId(1)));
        state.accept(Fetched { ticket: m.ticket, outcome: FetchOutcome::Pages(Err(failure())) });
        match &state.view {
            View::Chapter(view) => assert_eq!(view.pages.error(), Some(ChapterView::FAILED)),
            other => panic!("Expected chapter, got {:?}", other.kind()),
        }

        let m = state.navigate(Route::Mcq(UnitId(1)));
        state.accept(Fetched { ticket: m.ticket, outcome: FetchOutcome::Questions(Err(failure())) });
        assert_eq!(quiz(&mut state).questions.error(), Some(QuizView::FAILED));
    }

    #[test]
    fn quiz_answers_do_not_survive_leaving() {
        let (mut state, _) = AppState::start(Route::Chapter(UnitId(3)));
        let m = match key(&mut state, KeyCode::Char('m')) {
            Effect::Mount(m) => m,
            other => panic!("Expected mount, got {:?}", other),
        };
        assert_eq!(m.request, FetchRequest::Questions(UnitId(3)));

        state.accept(Fetched { ticket: m.ticket, outcome: FetchOutcome::Questions(Ok(questions())) });
        key(&mut state, KeyCode::Char('a'));
        key(&mut state, KeyCode::Enter);
        assert_eq!(quiz(&mut state).score, Some(1));

        key(&mut state, KeyCode::Esc);
        assert_eq!(state.router.current(), Route::Chapter(UnitId(3)));

        let m = match key(&mut state, KeyCode::Char('m')) {
            Effect::Mount(m) => m,
            other => panic!("Expected mount, got {:?}", other),
        };
        state.accept(Fetched { ticket: m.ticket, outcome: FetchOutcome::Questions(Ok(questions())) });
        let view = quiz(&mut state);
        assert!(view.answers.is_empty());
        assert_eq!(view.score, None);
    }

    #[test]
    fn quiz_keys_choose_and_submit() {
        let (mut state, m) = AppState::start(Route::Mcq(UnitId(1)));
        state.accept(Fetched { ticket: m.ticket, outcome: FetchOutcome::Questions(Ok(questions())) });

        key(&mut state, KeyCode::Char('a'));
        key(&mut state, KeyCode::Char('j'));
        key(&mut state, KeyCode::Char('2'));
        key(&mut state, KeyCode::Enter);

        let view = quiz(&mut state);
        assert_eq!(view.answers.get(0), Some(Choice::A));
        assert_eq!(view.answers.get(1), Some(Choice::B));
        assert_eq!(view.score_line().as_deref(), Some("Your score: 2 / 3"));
    }

    #[test]
    fn speak_emits_joined_text() {
        let (mut state, m) = AppState::start(Route::Chapter(UnitId(1)));
        state.accept(Fetched {
            ticket: m.ticket,
            outcome: FetchOutcome::Pages(Ok(vec![Page::new(1, 2, "two"), Page::new(2, 1, "one")])),
        });
        assert_eq!(key(&mut state, KeyCode::Char('s')), Effect::Speak("one two".into()));
    }

    #[test]
    fn speak_with_no_content_is_noop() {
        let (mut state, m) = AppState::start(Route::Chapter(UnitId(1)));
        state.accept(Fetched { ticket: m.ticket, outcome: FetchOutcome::Pages(Ok(vec![])) });
        assert_eq!(key(&mut state, KeyCode::Char('s')), Effect::None);
        assert!(state.command_line.message.is_none());
    }

    #[test]
    fn open_command_navigates() {
        let (mut state, _) = AppState::start(Route::Student);
        let effect = type_command(&mut state, "open /mcq/7");
        assert_eq!(
            effect,
            Effect::Mount(Mount { ticket: 2, request: FetchRequest::Questions(UnitId(7)) })
        );
        assert_eq!(state.command_line.history, vec!["open /mcq/7".to_string()]);
    }

    #[test]
    fn open_command_rejects_bad_path() {
        let (mut state, _) = AppState::start(Route::Student);
        assert_eq!(type_command(&mut state, "open /nowhere"), Effect::None);
        assert!(state.command_line.is_error);
        assert_eq!(state.command_line.message.as_deref(), Some("No route for /nowhere"));
    }

    #[test]
    fn unknown_command_sets_error() {
        let (mut state, _) = AppState::start(Route::Student);
        type_command(&mut state, "dance");
        assert_eq!(state.command_line.message.as_deref(), Some("Unknown command: dance"));
    }

    #[test]
    fn quit_via_key_and_command() {
        let (mut state, _) = AppState::start(Route::Student);
        assert_eq!(key(&mut state, KeyCode::Char('q')), Effect::Quit);
        assert_eq!(type_command(&mut state, "q"), Effect::Quit);
    }

    #[test]
    fn help_overlay_closes_on_any_key() {
        let (mut state, _) = AppState::start(Route::Student);
        key(&mut state, KeyCode::Char('?'));
        assert!(state.show_help);
        assert_eq!(key(&mut state, KeyCode::Char('q')), Effect::None);
        assert!(!state.show_help);
    }

    #[test]
    fn back_from_first_view_stays_on_units() {
        let (mut state, _) = AppState::start(Route::Student);
        let effect = key(&mut state, KeyCode::Esc);
        assert_eq!(effect, Effect::Mount(Mount { ticket: 2, request: FetchRequest::Units }));
    }

    #[test]
    fn quiz_outside_chapter_is_an_error() {
        let (mut state, _) = AppState::start(Route::Student);
        assert_eq!(key(&mut state, KeyCode::Char('m')), Effect::None);
        assert!(state.command_line.is_error);
    }

    #[test]
    fn command_line_editing() {
        let mut cl = CommandLineState::default();
        cl.enter_command_mode();
        for c in "opn".chars() {
            cl.insert_char(c);
        }
        cl.move_left();
        cl.insert_char('e');
        assert_eq!(cl.input, "open");
        cl.move_start();
        cl.delete_char_forward();
        assert_eq!(cl.input, "pen");
        cl.move_end();
        cl.delete_char();
        assert_eq!(cl.input, "pe");
    }

    #[test]
    fn command_history_navigation() {
        let mut cl = CommandLineState::default();
        cl.add_to_history("back".into());
        cl.add_to_history("back".into());
        cl.add_to_history("quiz".into());
        assert_eq!(cl.history.len(), 2);

        cl.history_up();
        assert_eq!(cl.input, "quiz");
        cl.history_up();
        assert_eq!(cl.input, "back");
        cl.history_down();
        assert_eq!(cl.input, "quiz");
        cl.history_down();
        assert_eq!(cl.input, "");
    }
}
