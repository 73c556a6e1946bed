//! Session state: the current query outcome plus the recent-search list.

use tracing::warn;

use crate::history::HistoryStore;
use crate::model::QueryOutcome;

/// Store key holding the JSON-encoded recent-search array.
pub const HISTORY_KEY: &str = "recent_searches";

const HISTORY_CAP: usize = 5;

/// Proof that a query was begun. `Session::settle` only applies an outcome
/// whose ticket is still current, so a slow stale response cannot overwrite
/// the result of a newer query.
#[derive(Debug)]
#[must_use = "a begun query must be settled"]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Session {
    outcome: QueryOutcome,
    recent: Vec<String>,
    store: Box<dyn HistoryStore>,
    generation: u64,
}

impl Session {
    /// History is loaded once here; absent or corrupt persisted data degrades
    /// to an empty list.
    pub fn new(store: Box<dyn HistoryStore>) -> Self {
        let recent = load_history(store.as_ref());
        Self { outcome: QueryOutcome::Idle, recent, store, generation: 0 }
    }

    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }

    pub fn is_busy(&self) -> bool {
        self.outcome.is_pending()
    }

    pub fn recent_searches(&self) -> &[String] {
        &self.recent
    }

    /// Transition to Pending, superseding whatever outcome came before.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.outcome = QueryOutcome::Pending;
        Ticket(self.generation)
    }

    /// Apply a terminal outcome. Returns false (and leaves state untouched)
    /// when the ticket has been superseded by a newer query.
    pub fn settle(&mut self, ticket: Ticket, outcome: QueryOutcome) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.outcome = outcome;
        true
    }

    /// Fail without ever entering Pending. Used for capability checks that
    /// resolve synchronously, before any request is issued. Also supersedes
    /// any in-flight query's ticket.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.generation += 1;
        self.outcome = QueryOutcome::failure(message);
    }

    /// Insert-or-promote the term at the front, cap the list, persist.
    /// Persistence is best-effort; a failed write never surfaces here.
    pub fn record_search(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }

        self.recent.retain(|t| t != term);
        self.recent.insert(0, term.to_string());
        self.recent.truncate(HISTORY_CAP);
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string(&self.recent) {
            Ok(payload) => {
                if let Err(err) = self.store.set(HISTORY_KEY, &payload) {
                    warn!(%err, "failed to persist search history");
                }
            }
            Err(err) => warn!(%err, "failed to encode search history"),
        }
    }
}

fn load_history(store: &dyn HistoryStore) -> Vec<String> {
    let Some(raw) = store.get(HISTORY_KEY) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(mut terms) => {
            terms.truncate(HISTORY_CAP);
            terms
        }
        Err(err) => {
            warn!(%err, "ignoring corrupt search history");
            Vec::new()
        }
    }
}
