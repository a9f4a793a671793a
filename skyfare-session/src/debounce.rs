//! Debounced ticket search for the home screen: the remote fetch waits for a
//! fixed quiet period after the last input change, so rapid edits coalesce
//! into a single catalog call. No other screen is debounced.

use std::sync::Arc;
use std::time::Duration;

use skyfare_core::repository::TicketCatalog;
use skyfare_core::search::{self, SearchQuery};
use skyfare_shared::models::Ticket;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Quiet period matching the source storefront's keystroke debounce.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(300);

/// Result of the latest settled search.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchOutcome {
    /// No search has settled yet.
    #[default]
    Idle,
    /// Pipeline output; an empty vec is the explicit no-results state.
    Results(Vec<Ticket>),
    /// The catalog call failed; screens fall back to an empty list.
    Failed,
}

pub struct SearchDriver {
    input: watch::Sender<SearchQuery>,
    output: watch::Receiver<SearchOutcome>,
    task: JoinHandle<()>,
}

impl SearchDriver {
    /// Start the driver. The first fetch fires one quiet period after spawn
    /// (the screen loads with its initial query); afterwards, each settled
    /// edit triggers one fetch-and-filter pass.
    pub fn spawn(catalog: Arc<dyn TicketCatalog>, quiet: Duration) -> Self {
        let (input_tx, mut input_rx) = watch::channel(SearchQuery::default());
        let (output_tx, output_rx) = watch::channel(SearchOutcome::Idle);

        let task = tokio::spawn(async move {
            loop {
                // Quiet window: every edit restarts the timer.
                loop {
                    tokio::select! {
                        changed = input_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                        () = tokio::time::sleep(quiet) => break,
                    }
                }

                let query = input_rx.borrow_and_update().clone();

                // An in-flight fetch is not cancelled by newer input; a late
                // result can land and is overwritten by the next settled one.
                let outcome = match catalog.list_tickets().await {
                    Ok(tickets) => SearchOutcome::Results(search::apply(&tickets, &query)),
                    Err(err) => {
                        warn!("ticket fetch failed: {}", err);
                        SearchOutcome::Failed
                    }
                };
                let _ = output_tx.send(outcome);

                // Idle until the next edit.
                if input_rx.changed().await.is_err() {
                    return;
                }
            }
        });

        Self {
            input: input_tx,
            output: output_rx,
            task,
        }
    }

    pub fn push(&self, query: SearchQuery) {
        let _ = self.input.send(query);
    }

    pub fn results(&self) -> watch::Receiver<SearchOutcome> {
        self.output.clone()
    }

    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for SearchDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
