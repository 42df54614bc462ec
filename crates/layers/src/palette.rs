use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of a configured palette.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PaletteId(pub String);

impl PaletteId {
    pub fn new(id: impl Into<String>) -> Self {
        PaletteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaletteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discrete color scale with one label per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub colors: Vec<String>,
    pub labels: Vec<String>,
}

impl Scale {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Palette shipped with the layer configuration, already rasterizable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPalette {
    pub id: PaletteId,
    pub scale: Scale,
}

/// User-selectable palette. It carries colors only; labels always come from
/// the layer's rendered scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPalette {
    pub id: PaletteId,
    pub name: String,
    pub colors: Vec<String>,
}

/// Derives a scale of the source's length from a custom palette by index
/// resampling. Labels are kept from the source so threshold readouts stay
/// meaningful under any palette.
pub fn translate(source: &Scale, custom: &CustomPalette) -> Scale {
    if source.is_empty() || custom.colors.is_empty() {
        return source.clone();
    }
    let colors = (0..source.len())
        .map(|i| {
            let j = i * custom.colors.len() / source.len();
            custom.colors[j.min(custom.colors.len() - 1)].clone()
        })
        .collect();
    Scale {
        colors,
        labels: source.labels.clone(),
    }
}

/// Per-layer color-range override. Absent bounds mean "full scale" on that
/// side.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl PaletteRange {
    /// Resolves the stored bounds against a scale of `scale_len` entries,
    /// clamping into `[0, scale_len - 1]`.
    pub fn resolve(&self, scale_len: usize) -> [u32; 2] {
        let last = scale_len.saturating_sub(1) as u32;
        let min = self.min.unwrap_or(0).min(last);
        let max = self.max.unwrap_or(last).min(last);
        [min, max]
    }
}

/// Palette association carried by a layer definition: its rendered palette
/// plus the custom palettes recommended for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerPaletteSpec {
    pub rendered: PaletteId,
    #[serde(default)]
    pub recommended: Vec<PaletteId>,
}

/// Palette configuration visible to the options panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteConfig {
    rendered: BTreeMap<PaletteId, RenderedPalette>,
    custom: BTreeMap<PaletteId, CustomPalette>,
    order: Vec<PaletteId>,
}

impl PaletteConfig {
    pub fn new(
        rendered: impl IntoIterator<Item = RenderedPalette>,
        custom: impl IntoIterator<Item = CustomPalette>,
        order: Vec<PaletteId>,
    ) -> Self {
        Self {
            rendered: rendered.into_iter().map(|p| (p.id.clone(), p)).collect(),
            custom: custom.into_iter().map(|p| (p.id.clone(), p)).collect(),
            order,
        }
    }

    pub fn rendered(&self, id: &PaletteId) -> Option<&RenderedPalette> {
        self.rendered.get(id)
    }

    pub fn custom(&self, id: &PaletteId) -> Option<&CustomPalette> {
        self.custom.get(id)
    }

    /// Display order for custom palettes in the selector.
    pub fn order(&self) -> &[PaletteId] {
        &self.order
    }
}
