//! Application context and lifecycle
//!
//! [`ClockContext`] is assembled once at startup and passed explicitly to
//! everything that needs the store. [`ClockApp`] wires the context's pieces
//! together on a tokio runtime and tears them down again.

use crate::clock::WallClock;
use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::host::IconHost;
use crate::input::{InputEvent, MENU_ENTRIES};
use crate::prefs::{persistence_observer, KeyValueStore, PreferenceStore};
use crate::render::IconRenderer;
use crate::scheduler::{RenderScheduler, SchedulerHandle};
use crate::state::{ClockAction, ClockReducer, ClockState, ClockStore};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tickmark_core::{Store, Subscription};
use tickmark_render::FaceRasterizer;
use tickmark_theme::{MonitorHandle, Palette, ThemeMonitor};

/// External collaborators the clock is built around
pub struct ClockServices {
    pub preferences: Arc<dyn KeyValueStore>,
    pub monitor: ThemeMonitor,
    pub clock: Arc<dyn WallClock>,
    pub host: Arc<dyn IconHost>,
    pub rasterizer: Arc<dyn FaceRasterizer>,
}

/// Everything the running clock shares
pub struct ClockContext {
    pub palette: Arc<Palette>,
    pub prefs: Arc<PreferenceStore>,
    pub store: Arc<ClockStore>,
    pub renderer: Arc<IconRenderer>,
    pub monitor: Arc<ThemeMonitor>,
    pub host: Arc<dyn IconHost>,
    theme_poll: Option<Duration>,
}

impl ClockContext {
    /// Resolve the palette, read startup preferences and create the store.
    ///
    /// The initial color comes from the preference for the monitor's current
    /// scheme, falling back to the scheme default.
    pub fn build(config: &AppConfig, services: ClockServices) -> Result<Self, ConfigError> {
        let palette = Arc::new(config.palette()?);
        let prefs = Arc::new(PreferenceStore::new(services.preferences));
        let scheme = services.monitor.current();

        let color_index = prefs
            .startup_color_index(scheme, palette.len())
            .unwrap_or_else(|| palette.default_index(scheme));
        let hour12 = prefs.startup_hour12().unwrap_or(true);
        let initial = ClockState::new(color_index, hour12, scheme);
        tracing::info!(
            %scheme,
            color = %palette.wrapped(color_index).name,
            hour12,
            "clock state initialized"
        );

        let stored = Arc::clone(&prefs);
        let reducer = ClockReducer::new(Arc::clone(&palette), stored);
        let store = Arc::new(Store::new(reducer, initial));
        let renderer = Arc::new(
            IconRenderer::new(
                Arc::clone(&palette),
                services.clock,
                Arc::clone(&services.host),
            )
            .with_rasterizer(services.rasterizer),
        );

        Ok(Self {
            palette,
            prefs,
            store,
            renderer,
            monitor: Arc::new(services.monitor),
            host: services.host,
            theme_poll: config.theme_poll_interval(),
        })
    }

    pub fn state(&self) -> Arc<ClockState> {
        self.store.get_state()
    }

    pub fn dispatch(&self, action: ClockAction) -> Arc<ClockState> {
        self.store.dispatch(action)
    }

    /// Apply a user input; unmapped inputs leave the state alone
    pub fn handle_input(&self, event: &InputEvent) -> Option<Arc<ClockState>> {
        let action = event.action()?;
        tracing::debug!(?event, ?action, "user input");
        Some(self.dispatch(action))
    }
}

/// A started clock: subscriptions, the render loop and the theme monitor
pub struct ClockApp {
    context: Arc<ClockContext>,
    subscriptions: Vec<Subscription>,
    scheduler: SchedulerHandle,
    monitor: Option<MonitorHandle>,
}

impl ClockApp {
    /// Wire up and start the clock. Must be called inside a tokio runtime.
    pub fn start(context: Arc<ClockContext>) -> Self {
        for entry in MENU_ENTRIES {
            if let Err(err) = context.host.add_menu_entry(entry) {
                tracing::warn!("could not add menu entry {}: {err}", entry.id);
            }
        }

        let renderer = Arc::clone(&context.renderer);
        let render_sub = context.store.subscribe(move |change| {
            if !change.is_noop() {
                renderer.render_or_skip(change.current);
            }
        });
        let persist_sub = context
            .store
            .subscribe(persistence_observer(Arc::clone(&context.prefs)));

        let store: Weak<ClockStore> = Arc::downgrade(&context.store);
        context.monitor.on_change(move |scheme| {
            if let Some(store) = store.upgrade() {
                store.dispatch(ClockAction::SystemColorSchemeChange(scheme));
            }
        });

        context.renderer.render_or_skip(&context.state());

        let scheduler =
            RenderScheduler::new(Arc::clone(&context.store), Arc::clone(&context.renderer))
                .spawn();
        let monitor = context
            .theme_poll
            .map(|interval| context.monitor.spawn(interval));

        tracing::info!(polling = monitor.is_some(), "clock started");
        Self {
            context,
            subscriptions: vec![render_sub, persist_sub],
            scheduler,
            monitor,
        }
    }

    pub fn context(&self) -> &Arc<ClockContext> {
        &self.context
    }

    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    pub fn handle_input(&self, event: &InputEvent) -> Option<Arc<ClockState>> {
        self.context.handle_input(event)
    }

    /// Stop the render loop and theme polling, then detach all listeners
    pub async fn shutdown(self) {
        self.scheduler.stop().await;
        self.context.monitor.detach();
        if let Some(monitor) = self.monitor {
            monitor.stop().await;
        }
        for subscription in &self.subscriptions {
            subscription.unsubscribe();
        }
        tracing::info!("clock stopped");
    }
}
