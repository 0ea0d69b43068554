//! Icon host interface
//!
//! The host is whatever displays the clock: a system tray, a toolbar, or in
//! the CLI a directory of files. Every call is best-effort; callers log
//! failures and carry on.

use crate::error::HostError;
use tickmark_render::RgbaImage;

/// A context-menu entry offered by the icon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: &'static str,
    pub title: &'static str,
}

pub trait IconHost: Send + Sync + 'static {
    /// Replace the displayed icon with a 128×128 RGBA bitmap
    fn set_icon(&self, icon: &RgbaImage) -> Result<(), HostError>;

    fn set_title(&self, title: &str) -> Result<(), HostError>;

    /// Register a context-menu entry. Hosts without menus accept and ignore it.
    fn add_menu_entry(&self, entry: &MenuEntry) -> Result<(), HostError> {
        tracing::trace!(id = entry.id, "host has no context menu");
        Ok(())
    }
}

/// Host that discards everything; useful when only the state flow matters
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl IconHost for NullHost {
    fn set_icon(&self, _icon: &RgbaImage) -> Result<(), HostError> {
        Ok(())
    }

    fn set_title(&self, _title: &str) -> Result<(), HostError> {
        Ok(())
    }
}
