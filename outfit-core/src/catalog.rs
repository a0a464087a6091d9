//! Static outfit image catalogue and tag matching.

use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};

use crate::model::{Gender, ImageCatalogEntry, Style};

const DEFAULT_CATALOG: &str = include_str!("../assets/catalog.json");

/// Offset applied when picking tiles for the days after today.
const WEEKLY_TILE_OFFSET: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCatalog {
    entries: Vec<ImageCatalogEntry>,
}

impl ImageCatalog {
    pub fn new(entries: Vec<ImageCatalogEntry>) -> Self {
        Self { entries }
    }

    /// The catalogue bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_CATALOG).context("Failed to parse built-in image catalogue")
    }

    /// Load a catalogue from a JSON file holding an array of entries.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read image catalogue: {}", path.display()))?;

        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse image catalogue: {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ImageCatalogEntry> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(anyhow!("Image catalogue contains no entries"));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ImageCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose tags mention the given gender and style.
    ///
    /// Falls back from "both" to "either" to the whole catalogue, so the
    /// result is only empty when the catalogue is.
    pub fn match_outfits(&self, gender: Gender, style: Style) -> Vec<ImageCatalogEntry> {
        match_outfits(&self.entries, gender, style)
    }

    /// Tile for the forecast day at `offset` (1 = tomorrow).
    pub fn weekly_tile(&self, offset: usize) -> Option<&ImageCatalogEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let index = (offset.saturating_sub(1) + WEEKLY_TILE_OFFSET) % self.entries.len();
        self.entries.get(index)
    }
}

pub fn match_outfits(catalog: &[ImageCatalogEntry], gender: Gender, style: Style) -> Vec<ImageCatalogEntry> {
    let gender = gender.as_str().to_lowercase();
    let style = style.as_str().to_lowercase();

    let tagged = |entry: &ImageCatalogEntry, both: bool| {
        let hint = entry.image_hint.to_lowercase();
        let (has_gender, has_style) = (hint.contains(&gender), hint.contains(&style));
        if both { has_gender && has_style } else { has_gender || has_style }
    };

    let both: Vec<_> = catalog.iter().filter(|e| tagged(*e, true)).cloned().collect();
    if !both.is_empty() {
        return both;
    }

    let either: Vec<_> = catalog.iter().filter(|e| tagged(*e, false)).cloned().collect();
    if !either.is_empty() {
        tracing::debug!(%gender, %style, "no entry matches both tags, using partial matches");
        return either;
    }

    tracing::debug!(%gender, %style, "no entry matches any tag, using full catalogue");
    catalog.to_vec()
}
