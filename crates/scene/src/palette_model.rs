use std::collections::BTreeMap;

use layers::{LayerId, PaletteId, PaletteRange};
use runtime::{Hub, SubscriptionId};

/// Notification emitted by [`PaletteModel`] before each mutator returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteEvent {
    PaletteSet { layer: LayerId, palette: PaletteId },
    PaletteCleared { layer: LayerId },
    Range { layer: LayerId, min: u32, max: u32 },
}

/// Per-layer palette assignment and color-range overrides.
#[derive(Debug, Default)]
pub struct PaletteModel {
    active: BTreeMap<LayerId, PaletteId>,
    ranges: BTreeMap<LayerId, PaletteRange>,
    events: Hub<PaletteEvent>,
}

impl PaletteModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The custom palette assigned to `layer`, if any. `None` means the
    /// layer renders with its default palette.
    pub fn active(&self, layer: &LayerId) -> Option<&PaletteId> {
        self.active.get(layer)
    }

    /// The stored range override for `layer`; defaults to the full scale.
    pub fn range(&self, layer: &LayerId) -> PaletteRange {
        self.ranges.get(layer).copied().unwrap_or_default()
    }

    /// Assigns a custom palette to `layer`.
    pub fn add(&mut self, layer: LayerId, palette: PaletteId) {
        self.active.insert(layer.clone(), palette.clone());
        self.events.emit(&PaletteEvent::PaletteSet { layer, palette });
    }

    /// Restores the default palette for `layer`.
    pub fn remove(&mut self, layer: &LayerId) {
        if self.active.remove(layer).is_some() {
            self.events.emit(&PaletteEvent::PaletteCleared {
                layer: layer.clone(),
            });
        }
    }

    /// Stores `[min, max]` as the color-range override for `layer`.
    pub fn set_range(&mut self, layer: &LayerId, min: u32, max: u32) {
        self.ranges.insert(
            layer.clone(),
            PaletteRange {
                min: Some(min),
                max: Some(max),
            },
        );
        self.events.emit(&PaletteEvent::Range {
            layer: layer.clone(),
            min,
            max,
        });
    }

    pub fn on(&mut self, handler: impl FnMut(&PaletteEvent) + 'static) -> SubscriptionId {
        self.events.on(handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.events.off(id)
    }
}
