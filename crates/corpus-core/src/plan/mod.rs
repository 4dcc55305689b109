pub mod input;
pub mod resolve;

pub use input::*;
pub use resolve::{resolve, ResolvedAssumptions};
