//! Read stage: loads raw bytes for each intake item

use crossbeam::channel::{Receiver, Sender};
use std::sync::Arc;

use super::metrics::MetricsAggregator;
use crate::error::ExtractError;
use crate::types::{HandoffItem, IntakeItem};

/// One read stage worker.
///
/// Runs until the intake channel is closed and drained. Every item it
/// receives is either forwarded on the hand-off channel or counted as an
/// error for its kind.
pub struct ReadWorker {
    id: usize,
    intake: Receiver<IntakeItem>,
    handoff: Sender<HandoffItem>,
    metrics: Arc<MetricsAggregator>,
}

impl ReadWorker {
    pub fn new(
        id: usize,
        intake: Receiver<IntakeItem>,
        handoff: Sender<HandoffItem>,
        metrics: Arc<MetricsAggregator>,
    ) -> Self {
        Self {
            id,
            intake,
            handoff,
            metrics,
        }
    }

    /// Worker loop. Returns the number of items forwarded downstream.
    pub fn run(self) -> usize {
        tracing::debug!(worker = self.id, "read worker started");
        let mut forwarded = 0;

        while let Ok(item) = self.intake.recv() {
            let kind = item.kind;
            match load(item) {
                Ok(loaded) => {
                    // Blocks while the hand-off channel is full
                    if self.handoff.send(loaded).is_err() {
                        // Only possible if every extraction worker is gone
                        tracing::error!(worker = self.id, %kind, "hand-off channel closed");
                        self.metrics.record_error(kind);
                        continue;
                    }
                    forwarded += 1;
                }
                Err(e) => {
                    tracing::debug!(worker = self.id, %kind, error = %e, "{}", e.label());
                    self.metrics.record_error(kind);
                }
            }
        }

        tracing::debug!(worker = self.id, forwarded, "read worker finished");
        forwarded
    }
}

/// Read the whole file behind an intake item
pub fn load(item: IntakeItem) -> Result<HandoffItem, ExtractError> {
    match std::fs::read(&item.source_path) {
        Ok(bytes) => Ok(HandoffItem::loaded(item, bytes)),
        Err(source) => Err(ExtractError::Read {
            path: item.source_path,
            source,
        }),
    }
}
