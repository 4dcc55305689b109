pub mod engine;
pub mod gap;
pub mod goals;
pub mod wealth;

pub use engine::*;
pub use gap::*;
pub use goals::*;
pub use wealth::*;
