// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Roster CSV reading, encoding fallback and row construction

mod csv_parser;

pub use csv_parser::CsvParser;
