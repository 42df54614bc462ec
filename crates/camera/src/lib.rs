pub mod flight;
pub mod planner;
pub mod view;

pub use flight::*;
pub use planner::*;
pub use view::*;
