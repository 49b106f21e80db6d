use crate::core::export::{export_csv, EXPORT_FILENAME};
use crate::core::csv_parser::parse_csv;
use crate::core::{IdGenerator, ImportPipeline, Lead, Storage};
use crate::utils::error::{AppError, Result};
use std::str::FromStr;

pub const JSON_OUTPUT_FILENAME: &str = "leads.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(AppError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: json, csv".to_string(),
            }),
        }
    }
}

pub struct ImportEngine<P: ImportPipeline> {
    pipeline: P,
}

impl<P: ImportPipeline> ImportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting lead import...");

        let content = self.pipeline.extract().await?;
        tracing::info!("Read {} bytes", content.len());

        let leads = self.pipeline.transform(content).await?;
        tracing::info!("Normalized {} leads", leads.len());

        let output_path = self.pipeline.load(leads).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

/// Reads a CSV through `Storage`, normalizes it, writes JSON or CSV back.
pub struct CsvImportPipeline<S: Storage> {
    storage: S,
    input_path: String,
    output_path: String,
    format: OutputFormat,
    ids: Box<dyn IdGenerator>,
}

impl<S: Storage> CsvImportPipeline<S> {
    pub fn new(
        storage: S,
        input_path: impl Into<String>,
        output_path: impl Into<String>,
        format: OutputFormat,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            storage,
            input_path: input_path.into(),
            output_path: output_path.into(),
            format,
            ids,
        }
    }

    fn output_filename(&self) -> &'static str {
        match self.format {
            OutputFormat::Json => JSON_OUTPUT_FILENAME,
            OutputFormat::Csv => EXPORT_FILENAME,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> ImportPipeline for CsvImportPipeline<S> {
    async fn extract(&self) -> Result<String> {
        crate::core::upload::check_extension(&self.input_path)?;
        tracing::debug!("Reading {}", self.input_path);
        let bytes = self.storage.read_file(&self.input_path).await?;
        crate::core::upload::decode_upload(&bytes)
    }

    async fn transform(&self, content: String) -> Result<Vec<Lead>> {
        let leads = parse_csv(&content, self.ids.as_ref());
        tracing::info!("📥 Parsed {} leads from {}", leads.len(), self.input_path);
        Ok(leads)
    }

    async fn load(&self, leads: Vec<Lead>) -> Result<String> {
        let filename = self.output_filename();
        let data = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&leads)?,
            OutputFormat::Csv => export_csv(&leads)?.unwrap_or_default(),
        };

        tracing::debug!("Writing {} ({} bytes) to storage", filename, data.len());
        self.storage.write_file(filename, data.as_bytes()).await?;

        Ok(format!("{}/{}", self.output_path.trim_end_matches('/'), filename))
    }
}
