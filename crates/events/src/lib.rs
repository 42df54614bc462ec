pub mod browser;
pub mod feed;
pub mod record;
pub mod resolver;

pub use browser::*;
pub use feed::*;
pub use record::*;
pub use resolver::*;
