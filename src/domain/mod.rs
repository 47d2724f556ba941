pub mod error;

// Contact roster types
pub mod roster;
