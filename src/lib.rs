//! chapterdesk - a terminal client for browsing course chapters
//!
//! Lists course units, shows a unit's pages, reads them aloud through the
//! platform speech synthesiser and runs generated multiple choice quizzes.

pub mod api;
pub mod app;
pub mod config;
pub mod speech;
pub mod theme;
pub mod ui;
pub mod views;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
