pub mod config;
pub mod contact;
pub mod csv;
pub mod json;
