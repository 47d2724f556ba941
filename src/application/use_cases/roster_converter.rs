// ============================================================
// ROSTER CONVERTER USE CASE
// ============================================================
// Orchestrate CSV loading, deduplication, normalization and JSON output

use std::time::Instant;

use tracing::info;

use crate::application::use_cases::address_formatter::AddressFormatter;
use crate::application::use_cases::group_normalizer;
use crate::application::use_cases::registry_merger::RegistryMerger;
use crate::application::use_cases::visibility;
use crate::domain::error::{AppError, Result};
use crate::domain::roster::{fields, ConversionConfig, ConversionReport, OutputRegistry, Row};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::json::JsonWriter;

/// Roster conversion use case
pub struct RosterConverter {
    config: ConversionConfig,
    parser: CsvParser,
    merger: RegistryMerger,
    formatter: AddressFormatter,
}

impl RosterConverter {
    /// Create a converter; fails on invalid configuration
    pub fn new(config: ConversionConfig) -> Result<Self> {
        config.validate().map_err(|e| {
            AppError::ValidationError(format!("Invalid conversion config: {}", e))
        })?;

        let parser = CsvParser::from_config(&config);
        let merger = RegistryMerger::new(config.key_field.clone(), config.merge_policy);
        let formatter = AddressFormatter::for_region(&config.default_region)?;

        Ok(Self {
            config,
            parser,
            merger,
            formatter,
        })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Read the input file, convert it and write the JSON document
    pub async fn convert(&self) -> Result<ConversionReport> {
        let start = Instant::now();
        let input_path = self.config.input_path();
        let output_path = self.config.output_path();

        info!(input = %input_path.display(), "Reading roster");
        let rows = self.parser.parse_file(&input_path).await?;
        let rows_read = rows.len();

        let registries = self.transform(rows);
        JsonWriter::write(&output_path, &registries).await?;

        let report = ConversionReport {
            rows_read,
            registries_written: registries.len(),
            addresses_written: registries.iter().map(|r| r.addresses.len()).sum(),
            output_path,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            rows = report.rows_read,
            registries = report.registries_written,
            addresses = report.addresses_written,
            elapsed_ms = report.processing_time_ms,
            "Roster converted"
        );
        Ok(report)
    }

    /// Convert CSV content held in memory
    pub fn convert_content(&self, content: &str) -> Result<Vec<OutputRegistry>> {
        let rows = self.parser.parse_content(content)?;
        Ok(self.transform(rows))
    }

    fn transform(&self, rows: Vec<Row>) -> Vec<OutputRegistry> {
        let parsed = rows.len();
        let unique = self.merger.deduplicate(rows);
        info!(rows = parsed, registries = unique.len(), "Deduplicated registries");

        unique
            .into_iter()
            .map(|row| self.build_registry(row))
            .collect()
    }

    fn build_registry(&self, mut row: Row) -> OutputRegistry {
        let groups = group_normalizer::normalize_row(&mut row);
        let addresses = self.formatter.format_row(&mut row);

        OutputRegistry {
            fullname: row.text(fields::FULLNAME),
            eid: row.text(&self.config.key_field),
            groups,
            addresses,
            invisible: visibility::flag(&row, fields::INVISIBLE),
            see_all: visibility::flag(&row, fields::SEE_ALL),
        }
    }
}
