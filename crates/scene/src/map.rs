use runtime::{Hub, SubscriptionId};

/// A map projection with its per-zoom resolution table.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub id: String,
    pub resolutions: Vec<f64>,
}

impl Projection {
    /// Geographic (plate carrée) projection with the stock resolution
    /// pyramid: each zoom level halves the degrees-per-pixel resolution.
    pub fn geographic() -> Self {
        let resolutions = (0..9).map(|z| 0.5625 / f64::from(1u32 << z)).collect();
        Self {
            id: "EPSG:4326".to_string(),
            resolutions,
        }
    }

    pub fn resolution_at(&self, zoom: usize) -> Option<f64> {
        self.resolutions.get(zoom).copied()
    }
}

/// Notification emitted by [`MapModel::select`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    ProjectionChanged { id: String },
}

/// The selected map/projection.
#[derive(Debug)]
pub struct MapModel {
    selected: Projection,
    events: Hub<MapEvent>,
}

impl Default for MapModel {
    fn default() -> Self {
        Self {
            selected: Projection::geographic(),
            events: Hub::new(),
        }
    }
}

impl MapModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &Projection {
        &self.selected
    }

    pub fn select(&mut self, projection: Projection) {
        let id = projection.id.clone();
        self.selected = projection;
        self.events.emit(&MapEvent::ProjectionChanged { id });
    }

    pub fn on(&mut self, handler: impl FnMut(&MapEvent) + 'static) -> SubscriptionId {
        self.events.on(handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.events.off(id)
    }
}
