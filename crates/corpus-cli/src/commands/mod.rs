pub mod plan;
pub mod quick;
pub mod sensitivity;
