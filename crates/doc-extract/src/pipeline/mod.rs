//! Concurrent read -> extract pipeline
//!
//! Enumerated files flow through a closed intake channel into a pool of
//! read workers, whose loaded bytes flow through a bounded hand-off channel
//! into a pool of extraction workers. Both pools run concurrently and
//! report into one [`MetricsAggregator`] created for the run.

mod coordinator;
mod extract_stage;
mod metrics;
mod panic_hook;
mod read_stage;

pub use coordinator::{enumerate_inputs, Pipeline, PipelineState};
pub use extract_stage::{output_path_for, ExtractWorker, EXTRACT_STAGE};
pub use metrics::{KindMetrics, MetricsAggregator, MetricsSnapshot};
pub use panic_hook::{install_panic_hook, is_extract_thread};
pub use read_stage::ReadWorker;
