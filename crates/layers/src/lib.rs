pub mod layer;
pub mod palette;
pub mod presets;

pub use layer::*;
pub use palette::*;
pub use presets::*;
