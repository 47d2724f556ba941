use std::path::PathBuf;

use clap::Parser;

use crate::infrastructure::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "roster-json")]
#[command(about = "Convert a CSV contact roster into normalized JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Input CSV file, resolved against the data directory (default: input.csv)
    pub input: Option<String>,

    /// TOML file with conversion settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the input and output files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output JSON file name (default: output.json)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Region used for phone numbers without a country code (default: BR)
    #[arg(long)]
    pub region: Option<String>,

    /// Turn blank CSV lines into empty rows instead of skipping them
    #[arg(long)]
    pub keep_empty_lines: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            input_file: self.input.clone(),
            output_file: self.output.clone(),
            default_region: self.region.clone(),
            skip_empty_lines: self.keep_empty_lines.then_some(false),
        }
    }

    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
