//! Minute-boundary render loop
//!
//! One tokio task owns the only render timer. Each pass sleeps until the next
//! minute as read from the live wall clock, renders the current state, then
//! re-reads the clock, so late wakeups never accumulate into drift.

use crate::clock::delay_until_next_minute;
use crate::render::IconRenderer;
use crate::state::ClockStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct RenderScheduler {
    store: Arc<ClockStore>,
    renderer: Arc<IconRenderer>,
}

impl RenderScheduler {
    pub fn new(store: Arc<ClockStore>, renderer: Arc<IconRenderer>) -> Self {
        Self { store, renderer }
    }

    /// Start the loop on the current tokio runtime
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let fires = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&fires);

        let task = tokio::spawn(async move {
            loop {
                let delay = delay_until_next_minute(&self.renderer.clock().now());
                tracing::trace!(?delay, "render timer armed");

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {
                        counter.fetch_add(1, Ordering::Relaxed);
                        let state = self.store.get_state();
                        self.renderer.render_or_skip(&state);
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("render scheduler stopped");
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
            fires,
        }
    }
}

/// Handle for the loop started by [`RenderScheduler::spawn`]
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    fires: Arc<AtomicU64>,
}

impl SchedulerHandle {
    /// Timer expirations so far
    pub fn fires(&self) -> u64 {
        self.fires.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the pending timer and wait for the loop to exit
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            tracing::warn!("render scheduler ended abnormally: {err}");
        }
    }
}
