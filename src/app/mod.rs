//! Application state and event handling

pub mod command;
pub mod fetch;
pub mod input;
pub mod route;
pub mod state;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::ApiClient;
use crate::config::Config;
use crate::speech::{SpeechError, Speaker, SystemSpeaker};
use crate::theme::Theme;
use crate::ui;
use fetch::{Fetched, Fetcher};
use route::Route;
use state::{AppState, Effect, Mount};

/// The main application
pub struct App {
    /// Current application state
    state: AppState,

    /// Resolved from the configuration once at startup
    theme: Theme,

    /// Request for the view mounted at startup, started by `run`
    pending: Option<Mount>,

    fetcher: Fetcher,

    /// Results of background requests
    results: UnboundedReceiver<Fetched>,

    /// Speech synthesiser, or why there is none
    speaker: Result<Box<dyn Speaker>, SpeechError>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    ///
    /// `api_url` overrides the configured base URL. The app opens at `route`.
    pub fn new(config: Config, api_url: Option<&str>, route: Route) -> Result<Self> {
        let base_url = api_url.unwrap_or(&config.api_base_url);
        let client = ApiClient::new(base_url, config.request_timeout())?;
        tracing::info!(base_url = client.base_url(), %route, "starting");

        let (fetcher, results) = Fetcher::new(Arc::new(client));
        let speaker = SystemSpeaker::from_config(config.speech_command.as_deref())
            .map(|s| Box::new(s) as Box<dyn Speaker>);
        if let Err(e) = &speaker {
            tracing::warn!(error = %e, "text to speech unavailable");
        }

        let (state, mount) = AppState::start(route);
        let terminal = Self::setup_terminal()?;

        Ok(Self {
            state,
            theme: config.active_theme(),
            pending: Some(mount),
            fetcher,
            results,
            speaker,
            terminal,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        if let Some(mount) = self.pending.take() {
            self.fetcher.start(mount.ticket, mount.request);
        }

        loop {
            // Apply finished requests
            while let Ok(fetched) = self.results.try_recv() {
                self.state.accept(fetched);
            }

            // Draw UI
            let theme = self.theme;
            let state = &mut self.state;
            self.terminal.draw(|frame| ui::draw(frame, state, &theme))?;

            // Handle events
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let effect = self.state.handle_key(key.code, key.modifiers);
                        if self.apply(effect) {
                            break;
                        }
                    }
                }
            }

            // Let fetch tasks make progress between frames
            tokio::task::yield_now().await;
        }

        self.fetcher.cancel();
        self.restore_terminal()?;
        Ok(())
    }

    /// Carry out an effect, returns true if should exit
    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Mount(mount) => self.fetcher.start(mount.ticket, mount.request),
            Effect::Speak(text) => match &self.speaker {
                Ok(speaker) => match speaker.speak(&text) {
                    Ok(()) => self.state.command_line.set_message("Playing text to speech"),
                    Err(e) => {
                        tracing::error!(error = %e, "speech failed");
                        self.state.command_line.set_error(e.to_string());
                    }
                },
                Err(e) => self.state.command_line.set_error(e.to_string()),
            },
        }
        false
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
