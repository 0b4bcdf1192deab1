//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Output format of the run report
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Main pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Directory scanned for input documents
    pub input_dir: PathBuf,
    /// Directory receiving one `.txt` file per extracted document
    pub output_dir: PathBuf,
    /// Where the run report is written
    pub report_path: PathBuf,
    /// Number of read stage workers
    pub read_workers: usize,
    /// Number of extraction stage workers
    pub extract_workers: usize,
    /// Capacity of the read -> extraction hand-off channel
    pub handoff_capacity: usize,
    /// Report output format
    pub report_format: ReportFormat,
    /// Reject HTML that is not valid UTF-8 instead of decoding lossily
    pub strict_utf8: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("Documentos"),
            output_dir: PathBuf::from("Documentos_extraidos"),
            report_path: PathBuf::from("relatorio.txt"),
            read_workers: 4,
            extract_workers: 4,
            handoff_capacity: 64,
            report_format: ReportFormat::Text,
            strict_utf8: false,
        }
    }
}

impl ExtractConfig {
    /// Load configuration from a TOML file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.read_workers == 0 {
            return Err(Error::config("read_workers must be at least 1"));
        }
        if self.extract_workers == 0 {
            return Err(Error::config("extract_workers must be at least 1"));
        }
        if self.handoff_capacity == 0 {
            return Err(Error::config("handoff_capacity must be at least 1"));
        }
        if self.input_dir.as_os_str().is_empty() {
            return Err(Error::config("input_dir must not be empty"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::config("output_dir must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExtractConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.read_workers, 4);
        assert_eq!(config.extract_workers, 4);
        assert_eq!(config.report_format, ReportFormat::Text);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExtractConfig::from_toml_str(
            r#"
            input_dir = "/data/in"
            extract_workers = 8
            report_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.input_dir, PathBuf::from("/data/in"));
        assert_eq!(config.extract_workers, 8);
        assert_eq!(config.read_workers, 4);
        assert_eq!(config.report_format, ReportFormat::Json);
        assert_eq!(config.output_dir, PathBuf::from("Documentos_extraidos"));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let config = ExtractConfig {
            read_workers: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ExtractConfig {
            handoff_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result = ExtractConfig::from_toml_str("read_workers = \"many\"");
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}
