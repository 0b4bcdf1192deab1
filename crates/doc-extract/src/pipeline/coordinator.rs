//! Pipeline coordinator: enumeration, worker pools and the shutdown protocol

use chrono::Utc;
use crossbeam::channel::bounded;
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use super::extract_stage::{ExtractWorker, EXTRACT_STAGE};
use super::metrics::MetricsAggregator;
use super::read_stage::ReadWorker;
use crate::config::ExtractConfig;
use crate::error::{Error, Result};
use crate::extraction::ExtractorRegistry;
use crate::report::{self, RunReport};
use crate::types::{DocumentKind, IntakeItem};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Enumerating,
    /// Read workers still running
    DrainingRead,
    /// Read workers joined, extraction workers finishing
    DrainingExtraction,
    Reporting,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Enumerating => "enumerating",
            Self::DrainingRead => "draining(read)",
            Self::DrainingExtraction => "draining(extraction)",
            Self::Reporting => "reporting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Two-stage read -> extract pipeline over one input directory
pub struct Pipeline {
    config: ExtractConfig,
    registry: ExtractorRegistry,
    state: Mutex<PipelineState>,
}

impl Pipeline {
    /// Create a pipeline; fails on invalid configuration
    pub fn new(config: ExtractConfig, registry: ExtractorRegistry) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            state: Mutex::new(PipelineState::Idle),
        })
    }

    /// Pipeline with the built-in PDF and HTML extractors
    pub fn with_default_extractors(config: ExtractConfig) -> Result<Self> {
        let registry = ExtractorRegistry::with_defaults(&config);
        Self::new(config, registry)
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        *self.state.lock()
    }

    fn transition(&self, next: PipelineState) {
        let mut state = self.state.lock();
        let previous = *state;
        tracing::debug!(from = %previous, to = %next, "pipeline state");
        *state = next;
    }

    /// Run the pipeline to completion and write the report.
    ///
    /// Per-document failures only show up as error counts. The returned
    /// error is reserved for problems that stop the run as a whole: a
    /// missing extractor, an output directory that cannot be created, an
    /// unreadable input directory, a worker that died, or a report that
    /// cannot be written.
    ///
    /// Every call counts into its own [`MetricsAggregator`], so concurrent
    /// runs on one pipeline never see each other's counts.
    pub fn run(&self) -> Result<RunReport> {
        // Fatal checks happen before any worker exists
        let extractors = self.registry.resolve()?;

        self.transition(PipelineState::Enumerating);
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
        let items = enumerate_inputs(&self.config.input_dir)?;

        let metrics = Arc::new(MetricsAggregator::new());
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(
            input_dir = %self.config.input_dir.display(),
            documents = items.len(),
            read_workers = self.config.read_workers,
            extract_workers = self.config.extract_workers,
            "starting extraction"
        );

        // Intake holds every item up front, then is closed: once drained,
        // each read worker sees the disconnect exactly once.
        let (intake_tx, intake_rx) = bounded::<IntakeItem>(items.len().max(1));
        for item in items {
            intake_tx
                .send(item)
                .map_err(|_| Error::worker("intake channel closed while seeding"))?;
        }
        drop(intake_tx);

        let (handoff_tx, handoff_rx) = bounded(self.config.handoff_capacity);

        self.transition(PipelineState::DrainingRead);
        let read_handles = spawn_pool("read", self.config.read_workers, |id| {
            let worker = ReadWorker::new(
                id,
                intake_rx.clone(),
                handoff_tx.clone(),
                Arc::clone(&metrics),
            );
            move || worker.run()
        })?;
        let extract_handles = spawn_pool(EXTRACT_STAGE, self.config.extract_workers, |id| {
            let worker = ExtractWorker::new(
                id,
                handoff_rx.clone(),
                extractors.clone(),
                output_dir.clone(),
                Arc::clone(&metrics),
            );
            move || worker.run()
        })?;

        // Workers own the only remaining channel endpoints
        drop(intake_rx);
        drop(handoff_tx);
        drop(handoff_rx);

        // Barrier 1: every intake item has been forwarded or counted, and
        // every hand-off sender is gone with its worker.
        let forwarded = join_pool("read", read_handles)?;

        // Barrier 2: only now can the hand-off channel be known to be final.
        self.transition(PipelineState::DrainingExtraction);
        let persisted = join_pool(EXTRACT_STAGE, extract_handles)?;

        self.transition(PipelineState::Reporting);
        let total_elapsed = start.elapsed();
        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            total_elapsed,
            metrics: metrics.snapshot(),
        };
        report::write_report(&report, &self.config.report_path, self.config.report_format)?;

        tracing::info!(
            forwarded,
            persisted,
            elapsed_secs = total_elapsed.as_secs_f64(),
            "extraction finished"
        );
        for (kind, metrics) in report.metrics.iter() {
            tracing::info!(
                %kind,
                success = metrics.success_count,
                errors = metrics.error_count,
                "kind summary"
            );
        }

        self.transition(PipelineState::Done);
        Ok(report)
    }
}

/// List the input files of known kinds, PDF group first, each sorted by name
pub fn enumerate_inputs(input_dir: &Path) -> Result<Vec<IntakeItem>> {
    let entries = std::fs::read_dir(input_dir).map_err(|e| Error::io(input_dir, e))?;

    let mut selected: Vec<(DocumentKind, PathBuf)> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(input_dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(kind) = DocumentKind::from_path(&path) {
            selected.push((kind, path));
        }
    }

    selected.sort_by(|(kind_a, path_a), (kind_b, path_b)| {
        kind_a
            .cmp(kind_b)
            .then_with(|| path_a.file_name().cmp(&path_b.file_name()))
    });

    Ok(selected
        .into_iter()
        .map(|(kind, path)| IntakeItem::new(kind, path))
        .collect())
}

fn spawn_pool<F, B>(stage: &str, size: usize, mut build: B) -> Result<Vec<JoinHandle<usize>>>
where
    B: FnMut(usize) -> F,
    F: FnOnce() -> usize + Send + 'static,
{
    (0..size)
        .map(|id| {
            thread::Builder::new()
                .name(format!("{}-{}", stage, id))
                .spawn(build(id))
                .map_err(|e| Error::worker(format!("failed to spawn {} worker {}: {}", stage, id, e)))
        })
        .collect()
}

fn join_pool(stage: &str, handles: Vec<JoinHandle<usize>>) -> Result<usize> {
    let mut total = 0;
    for handle in handles {
        let name = handle.thread().name().unwrap_or(stage).to_string();
        total += handle
            .join()
            .map_err(|_| Error::worker(format!("{} panicked", name)))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "z.html", "c.htm", "notes.txt", "README"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let items = enumerate_inputs(dir.path()).unwrap();
        let names: Vec<_> = items
            .iter()
            .map(|i| {
                (
                    i.kind,
                    i.source_path.file_name().unwrap().to_string_lossy().into_owned(),
                )
            })
            .collect();

        assert_eq!(
            names,
            vec![
                (DocumentKind::Pdf, "a.PDF".to_string()),
                (DocumentKind::Pdf, "b.pdf".to_string()),
                (DocumentKind::Html, "z.html".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_input_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = enumerate_inputs(&dir.path().join("absent"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractConfig {
            extract_workers: 0,
            ..Default::default()
        };
        assert!(matches!(
            Pipeline::with_default_extractors(config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_state_reaches_done() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();

        let config = ExtractConfig {
            input_dir: input,
            output_dir: dir.path().join("out"),
            report_path: dir.path().join("report.txt"),
            ..Default::default()
        };
        let pipeline = Pipeline::with_default_extractors(config).unwrap();
        assert_eq!(pipeline.state(), PipelineState::Idle);

        pipeline.run().unwrap();
        assert_eq!(pipeline.state(), PipelineState::Done);
    }

    #[test]
    fn test_concurrent_runs_keep_separate_counts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        for i in 0..20 {
            std::fs::write(input.join(format!("page{:02}.html", i)), b"<p>text</p>").unwrap();
        }

        let config = ExtractConfig {
            input_dir: input,
            output_dir: dir.path().join("out"),
            report_path: dir.path().join("report.txt"),
            read_workers: 2,
            extract_workers: 2,
            handoff_capacity: 1,
            ..Default::default()
        };
        let pipeline = Pipeline::with_default_extractors(config).unwrap();

        let reports: Vec<RunReport> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| pipeline.run())).collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });

        for report in reports {
            let html = report.metrics.get(DocumentKind::Html);
            assert_eq!((html.success_count, html.error_count), (20, 0));
            assert_eq!(html.durations.len(), 20);
            assert_eq!(report.metrics.get(DocumentKind::Pdf).total(), 0);
        }
    }
}
