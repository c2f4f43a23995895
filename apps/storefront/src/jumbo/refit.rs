//! Re-fit loop: turns a stream of resize signals into serialized fits.
//!
//! # Architecture
//! - The loop task owns the `JumboText`; nothing else touches its surface, so two
//!   fits can never interleave their probes.
//! - Signals arriving within `debounce` of each other collapse to the latest one.
//! - Each fit is CPU-bound and runs via `tokio::task::spawn_blocking`. The element is
//!   moved into the closure and handed back with the outcome ('static bound).
//! - Outcomes are published on a `watch` channel; dropping the handle's sender ends the
//!   loop and returns the element.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::jumbo::element::{HostEnvironment, JumboText, RefitOutcome};

const SIGNAL_BUFFER: usize = 32;

pub struct RefitHandle {
    signals: mpsc::Sender<HostEnvironment>,
    outcomes: watch::Receiver<Option<RefitOutcome>>,
    task: JoinHandle<Result<JumboText, AppError>>,
}

impl RefitHandle {
    /// Queues a resize signal carrying the layout read at signal time.
    pub async fn notify(&self, env: HostEnvironment) -> Result<(), AppError> {
        self.signals
            .send(env)
            .await
            .map_err(|_| AppError::Internal(anyhow::anyhow!("re-fit loop has stopped")))
    }

    /// Receiver of the most recent outcome (`None` until the first fit completes).
    pub fn outcomes(&self) -> watch::Receiver<Option<RefitOutcome>> {
        self.outcomes.clone()
    }

    /// Stops accepting signals, finishes any pending fit, returns the element.
    pub async fn shutdown(self) -> Result<JumboText, AppError> {
        drop(self.signals);
        self.task.await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("re-fit loop task failed: {e}"))
        })?
    }
}

pub fn spawn_refit_loop(element: JumboText, debounce: Duration) -> RefitHandle {
    let (signal_tx, signal_rx) = mpsc::channel(SIGNAL_BUFFER);
    let (outcome_tx, outcome_rx) = watch::channel(None);
    let task = tokio::spawn(run_refit_loop(element, signal_rx, outcome_tx, debounce));
    RefitHandle {
        signals: signal_tx,
        outcomes: outcome_rx,
        task,
    }
}

async fn run_refit_loop(
    mut element: JumboText,
    mut signals: mpsc::Receiver<HostEnvironment>,
    outcomes: watch::Sender<Option<RefitOutcome>>,
    debounce: Duration,
) -> Result<JumboText, AppError> {
    let mut fits = 0u32;

    while let Some(mut env) = signals.recv().await {
        let mut collapsed = 0u32;
        loop {
            match tokio::time::timeout(debounce, signals.recv()).await {
                Ok(Some(next)) => {
                    env = next;
                    collapsed += 1;
                }
                // Closed or quiet: fit with the latest layout we have.
                Ok(None) | Err(_) => break,
            }
        }

        let (returned, outcome) = tokio::task::spawn_blocking(move || {
            let outcome = element.handle_resize(&env);
            (element, outcome)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in re-fit: {e}")))?;

        element = returned;
        fits += 1;
        debug!(
            collapsed,
            font_size = outcome.font_size(),
            cap_text = outcome.cap_text,
            "Re-fit complete"
        );
        outcomes.send_replace(Some(outcome));
    }

    info!(fits, "Re-fit loop stopped");
    Ok(element)
}
