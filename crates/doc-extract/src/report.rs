//! Run summary rendering

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use crate::config::ReportFormat;
use crate::error::{Error, Result};
use crate::pipeline::MetricsSnapshot;
use crate::types::DocumentKind;

/// Everything a finished run reports
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Wall time from enumeration to the extraction pool joining
    pub total_elapsed: Duration,
    pub metrics: MetricsSnapshot,
}

impl RunReport {
    /// Documents counted across all kinds
    pub fn total_documents(&self) -> u64 {
        self.metrics.iter().map(|(_, m)| m.total()).sum()
    }
}

#[derive(Debug, Serialize)]
struct KindSummary {
    success_count: u64,
    error_count: u64,
    average_duration_secs: f64,
}

#[derive(Debug, Serialize)]
struct ReportDocument {
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    total_elapsed_secs: f64,
    kinds: BTreeMap<DocumentKind, KindSummary>,
}

impl From<&RunReport> for ReportDocument {
    fn from(report: &RunReport) -> Self {
        let kinds = report
            .metrics
            .iter()
            .map(|(kind, m)| {
                let summary = KindSummary {
                    success_count: m.success_count,
                    error_count: m.error_count,
                    average_duration_secs: m.average_duration().as_secs_f64(),
                };
                (kind, summary)
            })
            .collect();

        Self {
            started_at: report.started_at,
            finished_at: report.finished_at,
            total_elapsed_secs: report.total_elapsed.as_secs_f64(),
            kinds,
        }
    }
}

/// Render the human-readable summary
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "EXTRACTION REPORT\n");
    let _ = writeln!(
        out,
        "Total time: {:.2} seconds\n",
        report.total_elapsed.as_secs_f64()
    );

    for (kind, metrics) in report.metrics.iter() {
        let _ = writeln!(out, "{} files:", kind.display_name());
        let _ = writeln!(out, "   Succeeded: {}", metrics.success_count);
        let _ = writeln!(out, "   Failed: {}", metrics.error_count);
        let _ = writeln!(
            out,
            "   Average time: {:.2} seconds\n",
            metrics.average_duration().as_secs_f64()
        );
    }

    out
}

/// Render the summary as pretty JSON
pub fn render_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ReportDocument::from(report))?)
}

/// Render and write the report, creating the parent directory if needed
pub fn write_report(report: &RunReport, path: &Path, format: ReportFormat) -> Result<()> {
    let rendered = match format {
        ReportFormat::Text => render_text(report),
        ReportFormat::Json => render_json(report)?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, rendered).map_err(|e| Error::io(path, e))?;

    tracing::info!(path = %path.display(), ?format, "report written");
    Ok(())
}
