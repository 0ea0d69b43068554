//! tickmark theme system
//!
//! Light/dark awareness for the clock icon.
//!
//! # Overview
//!
//! - **Color schemes**: [`ColorScheme`] mirrors the OS light/dark preference
//! - **Palettes**: [`Palette`] is the fixed, ordered list of colors the icon
//!   cycles through, with per-scheme default picks
//! - **Detection**: [`detect_system_color_scheme`] reads the current OS
//!   preference through platform tooling
//! - **Monitoring**: [`ThemeMonitor`] polls a [`SchemeSource`] and reports
//!   each *distinct* change exactly once
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tickmark_theme::{Palette, SystemSchemeSource, ThemeMonitor};
//!
//! let palette = Palette::default();
//! let monitor = ThemeMonitor::new(SystemSchemeSource::default());
//! let start_index = palette.default_index(monitor.current());
//! ```

pub mod error;
pub mod monitor;
pub mod palette;
pub mod platform;
pub mod scheme;

pub use error::ThemeError;
pub use monitor::{MonitorHandle, SchemeSource, ThemeMonitor, DEFAULT_POLL_INTERVAL};
pub use palette::{NamedColor, Palette};
pub use platform::{detect_system_color_scheme, Platform, SystemSchemeSource};
pub use scheme::ColorScheme;
