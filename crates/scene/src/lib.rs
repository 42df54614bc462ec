pub mod date;
pub mod layer_model;
pub mod map;
pub mod palette_model;

pub use date::*;
pub use layer_model::*;
pub use map::*;
pub use palette_model::*;

/// The shared mutable models of the viewer.
///
/// Owned by the top-level application controller and passed explicitly to
/// every controller that needs them; there are no ambient singletons.
#[derive(Debug, Default)]
pub struct SceneModels {
    pub layers: LayerModel,
    pub palettes: PaletteModel,
    pub date: DateModel,
    pub map: MapModel,
}

impl SceneModels {
    pub fn new() -> Self {
        Self::default()
    }
}
