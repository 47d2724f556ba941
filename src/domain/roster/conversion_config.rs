// ============================================================
// CONVERSION CONFIGURATION
// ============================================================
// Values that drive the roster pipeline, passed explicitly to the use case

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How repeated header names are represented in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateColumns {
    /// Keep every value as a list
    #[default]
    Collect,

    /// Pre-join the values with `/`
    Join,
}

/// How phone/email fields of duplicated registries are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Append differing values with `/`
    #[default]
    Concatenate,

    /// Keep the last value seen
    Overwrite,
}

/// Configuration for a roster conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Directory the input and output file names are resolved against
    pub data_dir: PathBuf,

    /// Input CSV file name (default: input.csv)
    pub input_file: String,

    /// Output JSON file name (default: output.json)
    pub output_file: String,

    /// ISO 3166 region used to parse phone numbers without a country code
    pub default_region: String,

    /// Deduplication key (default: eid)
    pub key_field: String,

    /// Drop blank lines instead of turning them into empty rows
    pub skip_empty_lines: bool,

    /// Trim whitespace around every CSV value
    pub trim_values: bool,

    pub duplicate_columns: DuplicateColumns,

    pub merge_policy: MergePolicy,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            input_file: "input.csv".to_string(),
            output_file: "output.json".to_string(),
            default_region: "BR".to_string(),
            key_field: "eid".to_string(),
            skip_empty_lines: true,
            trim_values: false,
            duplicate_columns: DuplicateColumns::default(),
            merge_policy: MergePolicy::default(),
        }
    }
}

impl ConversionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(&self.input_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_file)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.input_file.trim().is_empty() {
            return Err("input_file must not be empty".to_string());
        }
        if self.output_file.trim().is_empty() {
            return Err("output_file must not be empty".to_string());
        }
        if self.key_field.trim().is_empty() {
            return Err("key_field must not be empty".to_string());
        }
        if self.default_region.trim().len() != 2 {
            return Err(format!(
                "default_region must be a two-letter region code, got '{}'",
                self.default_region
            ));
        }
        Ok(())
    }
}
