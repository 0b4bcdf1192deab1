//! doc-extract: bulk conversion of PDF and HTML documents into plain text
//!
//! A directory of documents is pushed through a two-stage pipeline: a pool
//! of read workers loads raw bytes, and a pool of extraction workers turns
//! them into normalized text files. Per-kind success/error counts and
//! timings are aggregated into a report written at the end of the run.

pub mod config;
pub mod error;
pub mod extraction;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::{ExtractConfig, ReportFormat};
pub use error::{Error, ExtractError, Result};
pub use extraction::{ExtractorRegistry, HtmlExtractor, PdfExtractor, TextExtractor};
pub use normalize::normalize_text;
pub use pipeline::{
    install_panic_hook, KindMetrics, MetricsAggregator, MetricsSnapshot, Pipeline, PipelineState,
};
pub use report::RunReport;
pub use types::{DocumentKind, HandoffItem, IntakeItem};
