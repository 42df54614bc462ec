pub mod geo;
pub mod time;

// Foundation crate: small, dependency-free primitives only.
pub use geo::*;
pub use time::*;
