//! System font discovery for the icon text
//!
//! The icon is drawn in a bold sans-serif face. Named families are tried
//! first, then the generic sans-serif and monospace families configured in
//! fontdb. A face is only accepted if it covers every character a clock
//! face can contain.

use crate::error::{RenderError, Result};
use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use std::fmt;
use std::sync::Arc;

/// Families tried before the generic fallbacks, in order
pub const PREFERRED_FAMILIES: &[&str] = &["Verdana", "DejaVu Sans", "Liberation Sans"];

/// Every character that can appear on an icon
const FACE_CHARS: &str = "0123456789AP";

/// A parsed font face shared between rasterizer clones
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
    family: String,
}

impl FontFace {
    /// Wrap raw font data, checking that it parses and has the clock glyphs
    pub fn from_data(data: Vec<u8>, index: u32, family: impl Into<String>) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|err| RenderError::InvalidFont(err.to_string()))?;
        if let Some(ch) = FACE_CHARS.chars().find(|ch| face.glyph_index(*ch).is_none()) {
            return Err(RenderError::MissingGlyph(ch));
        }
        if swash::FontRef::from_index(&data, index as usize).is_none() {
            return Err(RenderError::InvalidFont("unsupported font data".into()));
        }

        Ok(Self {
            data: Arc::new(data),
            index,
            family: family.into(),
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within a font collection
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn as_swash(&self) -> Result<swash::FontRef<'_>> {
        swash::FontRef::from_index(&self.data, self.index as usize)
            .ok_or_else(|| RenderError::InvalidFont("unsupported font data".into()))
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Scan the system font directories and pick the icon face
pub fn load_system_face() -> Result<FontFace> {
    let mut db = Database::new();
    db.load_system_fonts();
    tracing::debug!("{} system font faces found", db.len());
    load_from(&db)
}

/// Pick the icon face from an already populated database
pub fn load_from(db: &Database) -> Result<FontFace> {
    let named = PREFERRED_FAMILIES.iter().map(|name| Family::Name(*name));
    for family in named.chain([Family::SansSerif, Family::Monospace]) {
        let query = Query {
            families: &[family],
            weight: Weight::BOLD,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let Some(id) = db.query(&query) else {
            continue;
        };
        match load_face(db, id) {
            Ok(face) => return Ok(face),
            Err(err) => tracing::debug!("skipping font {:?}: {err}", family),
        }
    }
    Err(RenderError::FontUnavailable)
}

fn load_face(db: &Database, id: fontdb::ID) -> Result<FontFace> {
    let family = db
        .face(id)
        .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (source, index) = db.face_source(id).ok_or(RenderError::FontUnavailable)?;

    let data = match source {
        Source::File(path) => std::fs::read(&path)
            .map_err(|err| RenderError::InvalidFont(format!("{}: {err}", path.display())))?,
        Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        Source::SharedFile(_path, data) => data.as_ref().as_ref().to_vec(),
    };
    FontFace::from_data(data, index, family)
}
