//! Stdin command parsing

use anyhow::{bail, Result};
use tickmark_app::InputEvent;
use tickmark_theme::ColorScheme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Input(InputEvent),
    /// Report an OS scheme change, as the theme monitor would
    Scheme(ColorScheme),
    /// Print the current state
    Status,
    Quit,
}

/// Parse one stdin line; blank lines and `#` comments yield `None`
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let arg = words.next();
    if words.next().is_some() {
        bail!("too many arguments: {line}");
    }

    let command = match (verb, arg) {
        ("click", None) => Command::Input(InputEvent::IconClicked),
        ("menu", Some(id)) => Command::Input(InputEvent::menu(id)),
        ("menu", None) => bail!("usage: menu <id>"),
        ("scheme", Some(scheme)) => Command::Scheme(scheme.parse::<ColorScheme>()?),
        ("scheme", None) => bail!("usage: scheme <light|dark>"),
        ("status", None) => Command::Status,
        ("quit" | "exit", None) => Command::Quit,
        _ => bail!("unknown command: {line}"),
    };
    Ok(Some(command))
}
