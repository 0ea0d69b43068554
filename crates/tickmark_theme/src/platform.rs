//! System color scheme detection
//!
//! Detection shells out to the tooling each desktop ships with:
//! - macOS: `defaults read -g AppleInterfaceStyle`
//! - Windows: the `AppsUseLightTheme` registry value
//! - Linux: GNOME's `color-scheme` setting, then `GTK_THEME`
//!
//! `TICKMARK_COLOR_SCHEME=light|dark` overrides detection on every platform.

use crate::error::{Result, ThemeError};
use crate::monitor::SchemeSource;
use crate::scheme::ColorScheme;
use std::process::Command;

/// Environment variable that forces the detected scheme
pub const SCHEME_OVERRIDE_ENV: &str = "TICKMARK_COLOR_SCHEME";

/// Desktop platform families with distinct detection strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Other => "unknown",
        }
    }
}

/// Detect the OS color scheme, falling back to light when nothing can be read
pub fn detect_system_color_scheme() -> ColorScheme {
    match try_detect_system_color_scheme() {
        Ok(scheme) => scheme,
        Err(err) => {
            tracing::debug!("color scheme detection failed, assuming light: {err}");
            ColorScheme::Light
        }
    }
}

/// Detect the OS color scheme, reporting why detection failed
pub fn try_detect_system_color_scheme() -> Result<ColorScheme> {
    if let Ok(value) = std::env::var(SCHEME_OVERRIDE_ENV) {
        return value.parse();
    }

    match Platform::current() {
        Platform::MacOs => detect_macos(),
        Platform::Windows => detect_windows(),
        Platform::Linux => detect_linux(),
        Platform::Other => Err(ThemeError::Unsupported(Platform::Other.name())),
    }
}

/// [`SchemeSource`] backed by [`try_detect_system_color_scheme`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemSchemeSource;

impl SchemeSource for SystemSchemeSource {
    fn current(&self) -> Result<ColorScheme> {
        try_detect_system_color_scheme()
    }
}

fn detect_macos() -> Result<ColorScheme> {
    let output = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map_err(|e| ThemeError::Detection(format!("defaults: {e}")))?;

    // The key only exists while dark mode is on; a failed read means light.
    if !output.status.success() {
        return Ok(ColorScheme::Light);
    }
    Ok(parse_apple_interface_style(&String::from_utf8_lossy(
        &output.stdout,
    )))
}

fn detect_windows() -> Result<ColorScheme> {
    let output = Command::new("reg")
        .args([
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output()
        .map_err(|e| ThemeError::Detection(format!("reg: {e}")))?;

    if !output.status.success() {
        return Err(ThemeError::Detection(
            "AppsUseLightTheme not present".to_string(),
        ));
    }
    parse_apps_use_light_theme(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
        ThemeError::Detection("unexpected AppsUseLightTheme value".to_string())
    })
}

fn detect_linux() -> Result<ColorScheme> {
    let gsettings = Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output();

    if let Ok(output) = gsettings {
        if output.status.success() {
            if let Some(scheme) =
                parse_gsettings_color_scheme(&String::from_utf8_lossy(&output.stdout))
            {
                return Ok(scheme);
            }
        }
    }

    std::env::var("GTK_THEME")
        .ok()
        .and_then(|theme| parse_gtk_theme(&theme))
        .ok_or_else(|| ThemeError::Detection("no gsettings color-scheme or GTK_THEME".into()))
}

pub(crate) fn parse_apple_interface_style(output: &str) -> ColorScheme {
    if output.trim().eq_ignore_ascii_case("dark") {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}

/// `reg query` prints e.g. `AppsUseLightTheme    REG_DWORD    0x0`
pub(crate) fn parse_apps_use_light_theme(output: &str) -> Option<ColorScheme> {
    let line = output
        .lines()
        .find(|line| line.contains("AppsUseLightTheme"))?;
    match line.split_whitespace().last()? {
        "0x0" => Some(ColorScheme::Dark),
        "0x1" => Some(ColorScheme::Light),
        _ => None,
    }
}

/// gsettings prints quoted values such as `'prefer-dark'`
pub(crate) fn parse_gsettings_color_scheme(output: &str) -> Option<ColorScheme> {
    match output.trim().trim_matches('\'') {
        "prefer-dark" => Some(ColorScheme::Dark),
        "prefer-light" | "default" => Some(ColorScheme::Light),
        _ => None,
    }
}

/// `GTK_THEME` is `Name[:variant]`, e.g. `Adwaita:dark`
pub(crate) fn parse_gtk_theme(value: &str) -> Option<ColorScheme> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    if lower.ends_with(":dark") || lower.ends_with("-dark") {
        Some(ColorScheme::Dark)
    } else {
        Some(ColorScheme::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gsettings_values() {
        assert_eq!(
            parse_gsettings_color_scheme("'prefer-dark'\n"),
            Some(ColorScheme::Dark)
        );
        assert_eq!(
            parse_gsettings_color_scheme("'default'"),
            Some(ColorScheme::Light)
        );
        assert_eq!(parse_gsettings_color_scheme("''"), None);
    }

    #[test]
    fn registry_values() {
        let dark = "\r\nHKEY_CURRENT_USER\\...\\Personalize\r\n    AppsUseLightTheme    REG_DWORD    0x0\r\n";
        let light = "    AppsUseLightTheme    REG_DWORD    0x1";
        assert_eq!(parse_apps_use_light_theme(dark), Some(ColorScheme::Dark));
        assert_eq!(parse_apps_use_light_theme(light), Some(ColorScheme::Light));
        assert_eq!(parse_apps_use_light_theme("nothing here"), None);
    }

    #[test]
    fn gtk_theme_variants() {
        assert_eq!(parse_gtk_theme("Adwaita:dark"), Some(ColorScheme::Dark));
        assert_eq!(parse_gtk_theme("Arc-Dark"), Some(ColorScheme::Dark));
        assert_eq!(parse_gtk_theme("Adwaita"), Some(ColorScheme::Light));
        assert_eq!(parse_gtk_theme(""), None);
    }

    #[test]
    fn apple_interface_style() {
        assert_eq!(parse_apple_interface_style("Dark\n"), ColorScheme::Dark);
        assert_eq!(parse_apple_interface_style(""), ColorScheme::Light);
    }
}
