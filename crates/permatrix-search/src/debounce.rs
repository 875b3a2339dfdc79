//! Debounced evaluation of search input.
//!
//! Keystrokes arrive faster than a search is worth running. A
//! [`QueryDebouncer`] waits for a quiet window after the last input and then
//! evaluates once, with the value current at that moment.
//!
//! The latest input lives in a [`tokio::sync::watch`] channel, which only ever
//! holds one value, so inputs cannot queue up behind a slow evaluation. A
//! single background task owns the one timer.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use permatrix_search::QueryDebouncer;
//!
//! # async fn demo() {
//! let debouncer = QueryDebouncer::spawn(Duration::from_millis(300), |query| {
//!     println!("searching for {query}");
//! });
//!
//! debouncer.on_input("a");
//! debouncer.on_input("ad");
//! debouncer.on_input("admin"); // only this one is evaluated
//! # }
//! ```

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default quiet window.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Idle,
    Input(String),
}

/// Coalesces rapid input into at most one evaluation per quiet window.
///
/// Must be created inside a tokio runtime. Dropping the debouncer stops its
/// task; a pending evaluation is discarded.
#[derive(Debug)]
pub struct QueryDebouncer {
    input: watch::Sender<Pending>,
    window: Duration,
    task: JoinHandle<()>,
}

impl QueryDebouncer {
    /// Start the debouncer. `evaluate` runs on the background task.
    pub fn spawn<F>(window: Duration, evaluate: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let (input, rx) = watch::channel(Pending::Idle);
        let task = tokio::spawn(run(rx, window, evaluate));

        Self {
            input,
            window,
            task,
        }
    }

    /// Record a new raw value and restart the quiet window.
    pub fn on_input(&self, raw: impl Into<String>) {
        self.input.send_replace(Pending::Input(raw.into()));
    }

    /// Discard the pending evaluation, if any.
    pub fn cancel(&self) {
        self.input.send_replace(Pending::Idle);
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<F>(mut rx: watch::Receiver<Pending>, window: Duration, mut evaluate: F)
where
    F: FnMut(String),
{
    while rx.changed().await.is_ok() {
        // Every change inside the window restarts it.
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = tokio::time::sleep(window) => break,
            }
        }

        let pending = rx.borrow_and_update().clone();
        match pending {
            Pending::Input(query) => {
                debug!(query = %query, "Debounced query fired");
                evaluate(query);
            }
            Pending::Idle => debug!("Debounced query cancelled"),
        }
    }
}
