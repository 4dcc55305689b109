pub mod sensitivity;

pub use sensitivity::*;
