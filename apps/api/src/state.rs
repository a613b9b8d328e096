//! Shared handler state.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use meeple_db::Database;

/// Source of "today" for rent and return dates.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// State handed to every handler through axum's `State` extractor.
///
/// The database handle is constructed once at startup and injected here,
/// so tests can hand the router an in-memory database instead.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    clock: Clock,
}

impl AppState {
    /// State using the server's local calendar date.
    pub fn new(db: Database) -> Self {
        AppState {
            db,
            clock: Arc::new(|| Local::now().date_naive()),
        }
    }

    /// State with a custom clock.
    pub fn with_clock(db: Database, clock: Clock) -> Self {
        AppState { db, clock }
    }

    /// Today's date according to the clock.
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}
