use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::error::{AppError, Result};

/// Writes pretty-printed (2-space) JSON documents
pub struct JsonWriter;

impl JsonWriter {
    /// Serialize `value` without touching the filesystem
    pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Internal(format!("Failed to serialize JSON: {}", e)))
    }

    /// Create or overwrite `path` with the rendered document
    pub async fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let document = Self::render(value)?;

        tokio::fs::write(path, document.as_bytes())
            .await
            .map_err(|e| AppError::IoError(format!("Failed to write {}: {}", path.display(), e)))?;

        info!(path = %path.display(), bytes = document.len(), "Wrote JSON output");
        Ok(())
    }
}
