//! Display palette
//!
//! The palette is the fixed, ordered list of colors the clock face cycles
//! through. Its size and membership are decided once at startup.
//!
//! Defaults per scheme follow contrast against the toolbar: a dark toolbar
//! starts on the first entry (white), a light toolbar on the last (black).

use crate::error::{Result, ThemeError};
use crate::scheme::ColorScheme;
use tickmark_core::Color;

/// A palette entry: the configured name plus the resolved color
#[derive(Clone, Debug, PartialEq)]
pub struct NamedColor {
    pub name: String,
    pub color: Color,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Parse a CSS color name or `#rrggbb`; the input string becomes the name
    pub fn parse(spec: &str) -> Result<Self> {
        let color = spec.parse::<Color>().map_err(|source| ThemeError::InvalidColor {
            entry: spec.to_string(),
            source,
        })?;
        Ok(Self::new(spec.trim(), color))
    }
}

/// Non-empty ordered list of display colors
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    entries: Vec<NamedColor>,
}

impl Palette {
    pub fn new(entries: Vec<NamedColor>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ThemeError::EmptyPalette);
        }
        Ok(Self { entries })
    }

    /// Build a palette from color specs such as `["white", "#808080"]`
    pub fn from_specs<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let entries = specs
            .iter()
            .map(|spec| NamedColor::parse(spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NamedColor> {
        self.entries.get(index)
    }

    /// Entry at `index`, wrapping out-of-range indexes back into the palette
    pub fn wrapped(&self, index: usize) -> &NamedColor {
        &self.entries[index % self.entries.len()]
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.entries.len()
    }

    /// Index the clock starts on for `scheme` when nothing was persisted
    pub fn default_index(&self, scheme: ColorScheme) -> usize {
        match scheme {
            ColorScheme::Dark => 0,
            ColorScheme::Light => self.entries.len() - 1,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedColor> {
        self.entries.iter()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: vec![
                NamedColor::new("white", Color::WHITE),
                NamedColor::new("lightgrey", Color::from_hex(0xD3D3D3)),
                NamedColor::new("grey", Color::from_hex(0x808080)),
                NamedColor::new("black", Color::BLACK),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_runs_white_to_black() {
        let palette = Palette::default();
        let names: Vec<&str> = palette.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["white", "lightgrey", "grey", "black"]);
    }

    #[test]
    fn scheme_defaults_pick_the_ends() {
        let palette = Palette::from_specs(&["white", "grey", "black"]).unwrap();
        assert_eq!(palette.default_index(ColorScheme::Dark), 0);
        assert_eq!(palette.default_index(ColorScheme::Light), 2);
    }

    #[test]
    fn single_entry_palette_defaults_to_zero_for_both_schemes() {
        let palette = Palette::from_specs(&["#ff0000"]).unwrap();
        assert_eq!(palette.default_index(ColorScheme::Dark), 0);
        assert_eq!(palette.default_index(ColorScheme::Light), 0);
    }

    #[test]
    fn rejects_empty_and_invalid_specs() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            Palette::from_specs(&empty),
            Err(ThemeError::EmptyPalette)
        ));
        match Palette::from_specs(&["white", "notacolor"]) {
            Err(ThemeError::InvalidColor { entry, .. }) => assert_eq!(entry, "notacolor"),
            other => panic!("expected InvalidColor, got {other:?}"),
        }
    }

    #[test]
    fn wrapped_index_stays_in_bounds() {
        let palette = Palette::default();
        assert_eq!(palette.wrapped(5).name, "lightgrey");
        assert!(palette.contains_index(3));
        assert!(!palette.contains_index(4));
    }
}
