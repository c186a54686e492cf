pub mod draft;
pub mod order;
pub mod product;
pub mod stats;

pub use draft::*;
pub use order::*;
pub use product::*;
pub use stats::*;
