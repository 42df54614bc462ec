use layers::{LayerPresets, PresetLayer};

use crate::record::CategoryField;

/// Maps an event's category tags to a preset layer list.
///
/// First-match policy: tags are scanned in input order and the first one
/// present in the table wins, so tag order matters while table order does
/// not. An empty field or all-unknown tags fall back to the `Default`
/// preset; that is a normal outcome, not an error. The result is never
/// empty.
pub fn resolve<'a>(presets: &'a LayerPresets, category: &CategoryField) -> &'a [PresetLayer] {
    for tag in category.tags() {
        if let Some(list) = presets.get(&tag.text) {
            return list;
        }
    }
    presets.default_preset()
}
