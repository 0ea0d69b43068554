//! tickmark application layer
//!
//! Ties the action store to the icon: a pure [`ClockReducer`] owns the
//! clock's color and hour format, observers persist preferences and redraw
//! the icon after each dispatch, and a tokio task redraws on every minute
//! boundary.
//!
//! ```ignore
//! let context = Arc::new(ClockContext::build(&config, services)?);
//! let app = ClockApp::start(context);
//! app.handle_input(&InputEvent::IconClicked);
//! app.shutdown().await;
//! ```

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod input;
pub mod prefs;
pub mod render;
pub mod scheduler;
pub mod state;

pub use clock::{delay_until_next_minute, AnchoredClock, SystemClock, WallClock};
pub use config::AppConfig;
pub use context::{ClockApp, ClockContext, ClockServices};
pub use error::{ConfigError, HostError, PrefsError};
pub use host::{IconHost, MenuEntry, NullHost};
pub use input::{InputEvent, MENU_ENTRIES, TOGGLE_HOUR_FORMAT};
pub use prefs::{
    persistence_observer, KeyValueStore, MemoryStore, PreferenceStore, TomlFileStore,
};
pub use render::{IconRenderer, RenderedFrame};
pub use scheduler::{RenderScheduler, SchedulerHandle};
pub use state::{ClockAction, ClockReducer, ClockState, ClockStore, StoredColors};
