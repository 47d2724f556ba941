// ============================================================
// ROSTER DOMAIN LAYER
// ============================================================
// Core types for the contact roster conversion
// No I/O, no async

mod address;
mod conversion_config;
mod registry;
mod row;

pub use address::{Address, AddressKind};
pub use conversion_config::{ConversionConfig, DuplicateColumns, MergePolicy};
pub use registry::{ConversionReport, OutputRegistry};
pub use row::{FieldValue, Row};

/// Separator used whenever several values are folded into one string
pub const VALUE_SEPARATOR: &str = "/";

/// Well-known field names
pub mod fields {
    pub const FULLNAME: &str = "fullname";
    pub const GROUP: &str = "group";
    pub const GROUPS: &str = "groups";
    pub const INVISIBLE: &str = "invisible";
    pub const SEE_ALL: &str = "see_all";
}
