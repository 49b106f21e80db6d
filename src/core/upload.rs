use crate::core::csv_parser::parse_csv;
use crate::domain::model::Lead;
use crate::domain::ports::IdGenerator;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_file_extension;
use std::time::Duration;

pub const IDLE_LABEL: &str = "Upload CSV";
/// Transient labels revert to [`IDLE_LABEL`] after this long.
pub const LABEL_RESET_AFTER: Duration = Duration::from_millis(1800);

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(usize),
    WrongExtension,
    ParsingFailed,
}

impl UploadOutcome {
    pub fn from_result(result: &Result<Vec<Lead>>) -> Self {
        match result {
            Ok(leads) => UploadOutcome::Uploaded(leads.len()),
            Err(AppError::UnsupportedFile { .. }) => UploadOutcome::WrongExtension,
            Err(_) => UploadOutcome::ParsingFailed,
        }
    }

    pub fn label(&self) -> String {
        match self {
            UploadOutcome::Uploaded(count) => format!("Uploaded {} leads", count),
            UploadOutcome::WrongExtension => "Please select a .csv file".to_string(),
            UploadOutcome::ParsingFailed => "Parsing failed".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded(_))
    }
}

pub fn check_extension(filename: &str) -> Result<()> {
    validate_file_extension(filename, &["csv"])
}

pub fn decode_upload(bytes: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(bytes).map_err(|_| AppError::InvalidFileContent)?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
}

/// Extension check, decode, parse. The extension is rejected before the
/// content is looked at.
pub fn import_upload(filename: &str, bytes: &[u8], ids: &dyn IdGenerator) -> Result<Vec<Lead>> {
    check_extension(filename)?;
    let text = decode_upload(bytes)?;
    let leads = parse_csv(&text, ids);
    tracing::info!("📥 Parsed {} leads from {}", leads.len(), filename);
    Ok(leads)
}
