//! Course API integration
//!
//! HTTP client, error type and wire models for the unit, page and quiz
//! endpoints.

pub mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{Choice, Page, Question, Unit, UnitId};
