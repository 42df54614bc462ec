pub mod options;
pub mod slider;

pub use options::*;
pub use slider::*;
