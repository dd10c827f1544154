//! The single execution context completions are delivered on.
//!
//! Network I/O and decoding happen on the Tokio runtime. Completions are not run
//! there; they are posted to a [`CallbackQueue`] which the owner of the
//! presentation state drives from one place, so completions never race with each
//! other or with the code that owns that state.
use std::fmt;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Creates a connected context/queue pair.
pub fn callback_context() -> (CallbackContext, CallbackQueue) {
    let (tx, rx) = mpsc::unbounded_channel();

    (CallbackContext { tx }, CallbackQueue { rx })
}

/// Sending half, cloned into every client.
#[derive(Clone)]
pub struct CallbackContext {
    tx: UnboundedSender<Job>,
}

impl CallbackContext {
    /// Queues `job`. Returns `false` if the queue has been dropped, in which case
    /// `job` is dropped without running.
    pub fn post<F>(&self, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx.send(Box::new(job)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl fmt::Debug for CallbackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackContext")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Receiving half. Whoever owns this is the UI-safe context.
pub struct CallbackQueue {
    rx: UnboundedReceiver<Job>,
}

impl CallbackQueue {
    /// Waits for the next completion and runs it.
    ///
    /// Returns `false` once every [`CallbackContext`] is gone and nothing is queued.
    pub async fn next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Runs completions until every [`CallbackContext`] has been dropped.
    pub async fn run(mut self) {
        while self.next().await {}
    }

    /// Runs whatever is queued right now without waiting. Returns how many ran.
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}

impl fmt::Debug for CallbackQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackQueue").finish_non_exhaustive()
    }
}
