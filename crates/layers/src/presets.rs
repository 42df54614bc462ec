use std::collections::BTreeMap;

use crate::layer::LayerId;

/// Reserved preset name used when an event's category matches nothing.
pub const DEFAULT_CATEGORY: &str = "Default";

/// One entry of a preset layer list: a layer and its initial visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetLayer {
    pub id: LayerId,
    pub visible: bool,
}

impl PresetLayer {
    pub fn new(id: impl Into<String>, visible: bool) -> Self {
        Self {
            id: LayerId::new(id),
            visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    Parse(String),
    MissingDefault,
    EmptyPreset(String),
}

impl std::fmt::Display for PresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetError::Parse(msg) => write!(f, "preset table is not valid JSON: {msg}"),
            PresetError::MissingDefault => {
                write!(f, "preset table has no \"{DEFAULT_CATEGORY}\" entry")
            }
            PresetError::EmptyPreset(name) => write!(f, "preset \"{name}\" lists no layers"),
        }
    }
}

impl std::error::Error for PresetError {}

/// Category name -> ordered layer set activated when an event of that
/// category is selected.
///
/// The table always contains a [`DEFAULT_CATEGORY`] entry; lookups that miss
/// fall back to it, so resolution never comes back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPresets {
    table: BTreeMap<String, Vec<PresetLayer>>,
}

impl LayerPresets {
    /// The built-in table, matching the stock event-browser configuration.
    pub fn builtin() -> Self {
        let mut table = BTreeMap::new();
        table.insert(
            "Wildfires".to_string(),
            vec![
                PresetLayer::new("MODIS_Aqua_CorrectedReflectance_TrueColor", false),
                PresetLayer::new("MODIS_Terra_CorrectedReflectance_TrueColor", true),
                PresetLayer::new("MODIS_Fires_All", true),
            ],
        );
        table.insert(
            "Floods".to_string(),
            vec![
                PresetLayer::new("MODIS_Aqua_SurfaceReflectance_Bands121", false),
                PresetLayer::new("MODIS_Terra_SurfaceReflectance_Bands121", true),
            ],
        );
        table.insert(
            DEFAULT_CATEGORY.to_string(),
            vec![
                PresetLayer::new("MODIS_Aqua_CorrectedReflectance_TrueColor", false),
                PresetLayer::new("MODIS_Terra_CorrectedReflectance_TrueColor", true),
            ],
        );
        Self { table }
    }

    /// Loads a table from JSON of the form
    /// `{ "Wildfires": [["LayerId", true], ...], "Default": [...] }`.
    pub fn from_json(text: &str) -> Result<Self, PresetError> {
        let raw: BTreeMap<String, Vec<(String, bool)>> =
            serde_json::from_str(text).map_err(|e| PresetError::Parse(e.to_string()))?;

        if !raw.contains_key(DEFAULT_CATEGORY) {
            return Err(PresetError::MissingDefault);
        }

        let mut table = BTreeMap::new();
        for (name, layers) in raw {
            if layers.is_empty() {
                return Err(PresetError::EmptyPreset(name));
            }
            let layers = layers
                .into_iter()
                .map(|(id, visible)| PresetLayer::new(id, visible))
                .collect();
            table.insert(name, layers);
        }
        Ok(Self { table })
    }

    pub fn contains(&self, category: &str) -> bool {
        self.table.contains_key(category)
    }

    pub fn get(&self, category: &str) -> Option<&[PresetLayer]> {
        self.table.get(category).map(Vec::as_slice)
    }

    pub fn default_preset(&self) -> &[PresetLayer] {
        // The constructors guarantee the entry exists.
        self.table
            .get(DEFAULT_CATEGORY)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CATEGORY, LayerPresets, PresetError};
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_table_has_default_and_known_categories() {
        let presets = LayerPresets::builtin();
        assert!(presets.contains(DEFAULT_CATEGORY));
        assert!(presets.contains("Wildfires"));
        assert!(presets.contains("Floods"));
        assert!(!presets.default_preset().is_empty());
    }

    #[test]
    fn loads_table_from_json_preserving_layer_order() {
        let text = r#"{
            "Default": [["Base", true]],
            "Volcanoes": [["Ash", true], ["Thermal", false]]
        }"#;
        let presets = LayerPresets::from_json(text).unwrap();
        let volcano = presets.get("Volcanoes").unwrap();
        assert_eq!(volcano.len(), 2);
        assert_eq!(volcano[0].id.as_str(), "Ash");
        assert!(volcano[0].visible);
        assert_eq!(volcano[1].id.as_str(), "Thermal");
        assert!(!volcano[1].visible);
    }

    #[test]
    fn rejects_tables_without_a_default_entry() {
        let err = LayerPresets::from_json(r#"{"Wildfires": [["Fires", true]]}"#).unwrap_err();
        assert_eq!(err, PresetError::MissingDefault);
    }

    #[test]
    fn rejects_empty_presets() {
        let err = LayerPresets::from_json(r#"{"Default": []}"#).unwrap_err();
        assert_eq!(err, PresetError::EmptyPreset("Default".to_string()));
    }
}
