//! Background fetches for view activation
//!
//! Each activation gets one request, a ticket and a cancellation token.
//! Starting a new request cancels the previous one, and the UI loop drops any
//! result whose ticket is no longer current.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::route::Route;
use crate::api::{ApiClient, ApiError, Page, Question, Unit, UnitId};

/// Sequence number of a view activation
pub type Ticket = u64;

/// The single request a view issues when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    Units,
    Pages(UnitId),
    Questions(UnitId),
}

impl FetchRequest {
    /// Request issued by the view behind `route`
    pub fn for_route(route: Route) -> Self {
        match route.resolve() {
            Route::Chapter(id) => FetchRequest::Pages(id),
            Route::Mcq(id) => FetchRequest::Questions(id),
            Route::Root | Route::Student => FetchRequest::Units,
        }
    }
}

/// Result of a finished request
#[derive(Debug)]
pub enum FetchOutcome {
    Units(Result<Vec<Unit>, ApiError>),
    Pages(Result<Vec<Page>, ApiError>),
    Questions(Result<Vec<Question>, ApiError>),
}

/// A result tagged with the activation that asked for it
#[derive(Debug)]
pub struct Fetched {
    pub ticket: Ticket,
    pub outcome: FetchOutcome,
}

/// Spawns view requests and reports them on a channel
pub struct Fetcher {
    client: Arc<ApiClient>,
    tx: mpsc::UnboundedSender<Fetched>,
    in_flight: Option<CancellationToken>,
}

impl Fetcher {
    /// Create a fetcher and the receiver its results arrive on
    pub fn new(client: Arc<ApiClient>) -> (Self, mpsc::UnboundedReceiver<Fetched>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { client, tx, in_flight: None }, rx)
    }

    /// Start `request` for activation `ticket`, cancelling any earlier one
    pub fn start(&mut self, ticket: Ticket, request: FetchRequest) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        tracing::debug!(ticket, ?request, "starting fetch");
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    tracing::debug!(ticket, ?request, "fetch cancelled");
                }
                outcome = run(&client, request) => {
                    // Receiver gone means the app is shutting down
                    let _ = tx.send(Fetched { ticket, outcome });
                }
            }
        });

        self.in_flight = Some(token);
    }

    /// Cancel the in-flight request, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(client: &ApiClient, request: FetchRequest) -> FetchOutcome {
    match request {
        FetchRequest::Units => FetchOutcome::Units(client.units().await),
        FetchRequest::Pages(id) => FetchOutcome::Pages(client.unit_pages(id).await),
        FetchRequest::Questions(id) => FetchOutcome::Questions(client.generate_mcq(id).await),
    }
}
