// ============================================================
// OUTPUT REGISTRY
// ============================================================
// Final per-person record written to the JSON document

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Address;

/// One person, identified by `eid`, after deduplication and normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRegistry {
    pub fullname: String,

    pub eid: String,

    /// Sorted, deduplicated group tags
    pub groups: Vec<String>,

    pub addresses: Vec<Address>,

    pub invisible: bool,

    pub see_all: bool,
}

/// Summary of a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Rows parsed from the CSV file
    pub rows_read: usize,

    /// Registries written after deduplication
    pub registries_written: usize,

    /// Addresses that passed validation
    pub addresses_written: usize,

    pub output_path: PathBuf,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
