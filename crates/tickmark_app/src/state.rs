//! Clock state and its reducer
//!
//! [`ClockReducer`] is pure: it never writes preferences. Persisting a new
//! color or hour format is the job of the persistence observer in
//! [`crate::prefs`], which watches state transitions after each dispatch.

use std::sync::Arc;
use tickmark_core::store::{Reducer, Store};
use tickmark_theme::{ColorScheme, Palette};

/// State owned by the clock store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockState {
    /// Index into the palette; always `< palette.len()`
    pub color_index: usize,
    /// 12-hour face with AM/PM marker when true
    pub hour12: bool,
    /// Scheme the color index was chosen for
    pub scheme: ColorScheme,
}

impl ClockState {
    pub fn new(color_index: usize, hour12: bool, scheme: ColorScheme) -> Self {
        Self {
            color_index,
            hour12,
            scheme,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockAction {
    /// Priming dispatch; leaves state untouched
    Init,
    /// Advance to the next palette color (wrapping)
    ChangeColor,
    ToggleHourFormat,
    /// The OS switched between light and dark
    SystemColorSchemeChange(ColorScheme),
}

/// Read-only view of the color index persisted for each scheme
pub trait StoredColors: Send + Sync + 'static {
    fn stored_color(&self, scheme: ColorScheme) -> Option<usize>;
}

/// Nothing persisted; every scheme falls back to its palette default
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStoredColors;

impl StoredColors for NoStoredColors {
    fn stored_color(&self, _scheme: ColorScheme) -> Option<usize> {
        None
    }
}

pub struct ClockReducer {
    palette: Arc<Palette>,
    stored: Arc<dyn StoredColors>,
}

impl ClockReducer {
    pub fn new(palette: Arc<Palette>, stored: Arc<dyn StoredColors>) -> Self {
        Self { palette, stored }
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Persisted index for `scheme` if it is inside the palette, else the scheme default
    fn color_for_scheme(&self, scheme: ColorScheme) -> usize {
        self.stored
            .stored_color(scheme)
            .filter(|index| self.palette.contains_index(*index))
            .unwrap_or_else(|| self.palette.default_index(scheme))
    }
}

impl Reducer for ClockReducer {
    type State = ClockState;
    type Action = ClockAction;

    fn init_action(&self) -> ClockAction {
        ClockAction::Init
    }

    fn reduce(&self, state: &Arc<ClockState>, action: &ClockAction) -> Arc<ClockState> {
        match *action {
            ClockAction::ChangeColor => Arc::new(ClockState {
                color_index: (state.color_index + 1) % self.palette.len(),
                ..**state
            }),
            ClockAction::ToggleHourFormat => Arc::new(ClockState {
                hour12: !state.hour12,
                ..**state
            }),
            ClockAction::SystemColorSchemeChange(scheme) => Arc::new(ClockState {
                color_index: self.color_for_scheme(scheme),
                scheme,
                ..**state
            }),
            ClockAction::Init => Arc::clone(state),
        }
    }
}

pub type ClockStore = Store<ClockReducer>;
