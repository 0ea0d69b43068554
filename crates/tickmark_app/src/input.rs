//! User input mapping

use crate::host::MenuEntry;
use crate::state::ClockAction;

pub const TOGGLE_HOUR_FORMAT: MenuEntry = MenuEntry {
    id: "toggleHourFormat",
    title: "12/24 Hour Format",
};

/// Context-menu entries registered with the host at startup
pub const MENU_ENTRIES: &[MenuEntry] = &[TOGGLE_HOUR_FORMAT];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary click on the icon
    IconClicked,
    /// A context-menu entry was activated
    MenuItem(String),
}

impl InputEvent {
    pub fn menu(id: impl Into<String>) -> Self {
        Self::MenuItem(id.into())
    }

    /// Action this input maps to, if any
    pub fn action(&self) -> Option<ClockAction> {
        match self {
            Self::IconClicked => Some(ClockAction::ChangeColor),
            Self::MenuItem(id) if id == TOGGLE_HOUR_FORMAT.id => {
                Some(ClockAction::ToggleHourFormat)
            }
            Self::MenuItem(id) => {
                tracing::debug!("ignoring unknown menu item {id:?}");
                None
            }
        }
    }
}
