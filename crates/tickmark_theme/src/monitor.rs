//! System scheme monitor
//!
//! [`ThemeMonitor`] remembers the last scheme it reported and forwards only
//! *distinct* changes to its listener. Changes arrive either from polling a
//! [`SchemeSource`] on a tokio task ([`ThemeMonitor::spawn`]) or from an
//! external push ([`ThemeMonitor::notify`]); both paths share the same dedupe.
//!
//! Sources may block (platform detection shells out), so the polling task
//! reads them on tokio's blocking pool and never stalls the runtime thread.

use crate::error::Result;
use crate::scheme::ColorScheme;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default interval between scheme polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Something that can report the current OS color scheme
pub trait SchemeSource: Send + Sync + 'static {
    fn current(&self) -> Result<ColorScheme>;
}

impl<F> SchemeSource for F
where
    F: Fn() -> Result<ColorScheme> + Send + Sync + 'static,
{
    fn current(&self) -> Result<ColorScheme> {
        self()
    }
}

type ChangeListener = Arc<dyn Fn(ColorScheme) + Send + Sync>;

pub struct ThemeMonitor {
    source: Arc<dyn SchemeSource>,
    last: Mutex<ColorScheme>,
    listener: Mutex<Option<ChangeListener>>,
}

impl ThemeMonitor {
    /// Create a monitor seeded with the source's current scheme (light if unreadable).
    ///
    /// The seed is read on the calling thread.
    pub fn new(source: impl SchemeSource) -> Self {
        let initial = source.current().unwrap_or_else(|err| {
            tracing::debug!("initial scheme unavailable, assuming light: {err}");
            ColorScheme::Light
        });
        Self::with_initial(source, initial)
    }

    pub fn with_initial(source: impl SchemeSource, initial: ColorScheme) -> Self {
        Self {
            source: Arc::new(source),
            last: Mutex::new(initial),
            listener: Mutex::new(None),
        }
    }

    /// Last scheme observed
    pub fn current(&self) -> ColorScheme {
        *self.last.lock().unwrap()
    }

    /// Install the change listener, replacing any previous one
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(ColorScheme) + Send + Sync + 'static,
    {
        *self.listener.lock().unwrap() = Some(Arc::new(listener));
    }

    /// Remove the change listener; later changes are still tracked but not reported
    pub fn detach(&self) {
        self.listener.lock().unwrap().take();
    }

    pub fn is_attached(&self) -> bool {
        self.listener.lock().unwrap().is_some()
    }

    /// Record `scheme`; returns true and calls the listener only if it differs
    /// from the last observed scheme.
    pub fn notify(&self, scheme: ColorScheme) -> bool {
        {
            let mut last = self.last.lock().unwrap();
            if *last == scheme {
                tracing::trace!(%scheme, "ignoring repeated scheme notification");
                return false;
            }
            tracing::debug!("system color scheme changed: {} -> {}", *last, scheme);
            *last = scheme;
        }

        let listener = self.listener.lock().unwrap().clone();
        if let Some(listener) = listener {
            listener(scheme);
        }
        true
    }

    /// Read the source on this thread and report a distinct change
    pub fn poll(&self) -> Option<ColorScheme> {
        self.report(self.source.current())
    }

    /// Read the source on the blocking pool and report a distinct change
    pub async fn poll_blocking(&self) -> Option<ColorScheme> {
        let source = Arc::clone(&self.source);
        match tokio::task::spawn_blocking(move || source.current()).await {
            Ok(read) => self.report(read),
            Err(err) => {
                tracing::warn!("scheme poll task failed: {err}");
                None
            }
        }
    }

    fn report(&self, read: Result<ColorScheme>) -> Option<ColorScheme> {
        match read {
            Ok(scheme) => self.notify(scheme).then_some(scheme),
            Err(err) => {
                tracing::debug!("scheme poll failed: {err}");
                None
            }
        }
    }

    /// Poll the source every `interval` on a tokio task until the handle is stopped.
    ///
    /// A slow read delays the next poll but not shutdown; at most one read is
    /// in flight.
    pub fn spawn(self: &Arc<Self>, interval: Duration) -> MonitorHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let monitor = Arc::clone(self);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the seed value covers it.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tokio::select! {
                            _ = monitor.poll_blocking() => {}
                            changed = shutdown_rx.changed() => {
                                if changed.is_err() || *shutdown_rx.borrow() {
                                    break;
                                }
                            }
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("theme monitor stopped");
        });

        MonitorHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle for a polling task started with [`ThemeMonitor::spawn`]
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Stop polling and wait for the task to finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            tracing::warn!("theme monitor task ended abnormally: {err}");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
