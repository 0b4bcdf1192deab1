//! Extraction stage: bytes -> normalized text on disk

use crossbeam::channel::Receiver;
use std::any::Any;
use std::ffi::OsStr;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::metrics::MetricsAggregator;
use crate::error::ExtractError;
use crate::extraction::ExtractorSet;
use crate::normalize::normalize_text;
use crate::types::HandoffItem;

/// Thread name prefix of the extraction pool (`extract-0`, `extract-1`, ...)
pub const EXTRACT_STAGE: &str = "extract";

/// One extraction stage worker.
///
/// Runs until the hand-off channel is closed and drained. Each item ends as
/// exactly one success (with its timing) or one error in the metrics.
pub struct ExtractWorker {
    id: usize,
    handoff: Receiver<HandoffItem>,
    extractors: ExtractorSet,
    output_dir: PathBuf,
    metrics: Arc<MetricsAggregator>,
}

impl ExtractWorker {
    pub fn new(
        id: usize,
        handoff: Receiver<HandoffItem>,
        extractors: ExtractorSet,
        output_dir: PathBuf,
        metrics: Arc<MetricsAggregator>,
    ) -> Self {
        Self {
            id,
            handoff,
            extractors,
            output_dir,
            metrics,
        }
    }

    /// Worker loop. Returns the number of documents persisted.
    pub fn run(self) -> usize {
        tracing::debug!(worker = self.id, "extract worker started");
        let mut persisted = 0;

        while let Ok(item) = self.handoff.recv() {
            let kind = item.kind;
            let source = item.source_path.clone();
            match self.process(item) {
                Ok(elapsed) => {
                    self.metrics.record_success(kind, elapsed);
                    persisted += 1;
                }
                Err(e) => {
                    tracing::debug!(
                        worker = self.id,
                        %kind,
                        source = %source.display(),
                        error = %e,
                        "{}",
                        e.label()
                    );
                    self.metrics.record_error(kind);
                }
            }
        }

        tracing::debug!(worker = self.id, persisted, "extract worker finished");
        persisted
    }

    /// Extract, normalize and persist one document, returning the time it took
    pub fn process(&self, item: HandoffItem) -> Result<Duration, ExtractError> {
        let started = Instant::now();
        let output_path = output_path_for(&self.output_dir, &item.source_path);

        let extractor = self.extractors.for_kind(item.kind);
        let raw = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(&item.raw_bytes)))
            .unwrap_or_else(|payload| {
                Err(ExtractError::parse(
                    item.kind,
                    format!("extractor panicked: {}", panic_message(payload.as_ref())),
                ))
            })?;

        let text = normalize_text(&raw);
        persist_atomically(&self.output_dir, &output_path, &text)?;

        Ok(started.elapsed())
    }
}

/// Text carried by a panic payload, if it is a string
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string payload")
}

/// `<output_dir>/<source stem>.txt`
pub fn output_path_for(output_dir: &Path, source: &Path) -> PathBuf {
    let mut name = source
        .file_stem()
        .unwrap_or_else(|| OsStr::new("document"))
        .to_os_string();
    name.push(".txt");
    output_dir.join(name)
}

/// Write `text` to `target` as UTF-8, all or nothing.
///
/// The text goes to a temp file in the same directory first and is renamed
/// over `target`, so a failed write never leaves a partial output behind.
fn persist_atomically(dir: &Path, target: &Path, text: &str) -> Result<(), ExtractError> {
    let write_error = |source: std::io::Error| ExtractError::Write {
        path: target.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".doc-extract-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_error)?;
    tmp.write_all(text.as_bytes()).map_err(write_error)?;
    tmp.flush().map_err(write_error)?;
    tmp.persist(target).map_err(|e| write_error(e.error))?;
    Ok(())
}
