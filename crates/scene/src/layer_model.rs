use layers::LayerId;
use runtime::{Hub, SubscriptionId};

/// One entry in the active layer list.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveLayer {
    pub id: LayerId,
    pub visible: bool,
    pub opacity: f64,
}

/// Notification emitted by [`LayerModel`] before each mutator returns.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerEvent {
    Added { id: LayerId, visible: bool },
    Removed { id: LayerId },
    Cleared,
    Opacity { id: LayerId, opacity: f64 },
}

/// Ordered set of currently active layers.
///
/// Mutators emit their notification synchronously before returning, so any
/// subscriber observes consistent state ahead of whatever the caller does
/// next (scheduling a camera flight, for instance).
#[derive(Debug, Default)]
pub struct LayerModel {
    active: Vec<ActiveLayer>,
    events: Hub<LayerEvent>,
}

impl LayerModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[ActiveLayer] {
        &self.active
    }

    pub fn get(&self, id: &LayerId) -> Option<&ActiveLayer> {
        self.active.iter().find(|l| &l.id == id)
    }

    /// Appends a layer to the active list. Re-adding an id moves it to the
    /// end with the new visibility and a reset opacity.
    pub fn add(&mut self, id: LayerId, visible: bool) {
        self.active.retain(|l| l.id != id);
        self.active.push(ActiveLayer {
            id: id.clone(),
            visible,
            opacity: 1.0,
        });
        self.events.emit(&LayerEvent::Added { id, visible });
    }

    /// Removes a layer. Unknown ids are a silent no-op: nothing is emitted.
    pub fn remove(&mut self, id: &LayerId) {
        let before = self.active.len();
        self.active.retain(|l| &l.id != id);
        if self.active.len() != before {
            self.events.emit(&LayerEvent::Removed { id: id.clone() });
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.events.emit(&LayerEvent::Cleared);
    }

    /// Sets a layer's opacity, clamped into `[0, 1]`. Unknown ids emit
    /// nothing.
    pub fn set_opacity(&mut self, id: &LayerId, opacity: f64) {
        let opacity = opacity.clamp(0.0, 1.0);
        let Some(layer) = self.active.iter_mut().find(|l| &l.id == id) else {
            return;
        };
        layer.opacity = opacity;
        self.events.emit(&LayerEvent::Opacity {
            id: id.clone(),
            opacity,
        });
    }

    pub fn on(&mut self, handler: impl FnMut(&LayerEvent) + 'static) -> SubscriptionId {
        self.events.on(handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.events.off(id)
    }
}
