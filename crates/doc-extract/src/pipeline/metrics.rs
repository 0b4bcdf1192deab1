//! Per-kind success/error counters and extraction timings.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::types::DocumentKind;

/// Counters and timings for one document kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KindMetrics {
    /// Documents extracted and persisted
    pub success_count: u64,
    /// Documents that failed at any stage
    pub error_count: u64,
    /// Extraction time of each success, in completion order
    pub durations: Vec<Duration>,
}

impl KindMetrics {
    /// Mean extraction time, zero when nothing succeeded
    pub fn average_duration(&self) -> Duration {
        if self.durations.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.durations.iter().sum();
        total / self.durations.len() as u32
    }

    /// Longest single extraction, zero when nothing succeeded
    pub fn max_duration(&self) -> Duration {
        self.durations.iter().copied().max().unwrap_or_default()
    }

    /// Documents accounted for, in either column
    pub fn total(&self) -> u64 {
        self.success_count + self.error_count
    }
}

/// Read-only copy of the aggregator state.
///
/// Always holds an entry for every [`DocumentKind`], so kinds with no input
/// files still report zeroes.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    kinds: BTreeMap<DocumentKind, KindMetrics>,
}

impl MetricsSnapshot {
    /// Metrics for one kind
    pub fn get(&self, kind: DocumentKind) -> &KindMetrics {
        // Constructed with every kind present
        &self.kinds[&kind]
    }

    /// Iterate kinds in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (DocumentKind, &KindMetrics)> {
        self.kinds.iter().map(|(kind, metrics)| (*kind, metrics))
    }

    /// Longest extraction across all kinds
    pub fn max_duration(&self) -> Duration {
        self.kinds
            .values()
            .map(KindMetrics::max_duration)
            .max()
            .unwrap_or_default()
    }
}

fn empty_kinds() -> BTreeMap<DocumentKind, KindMetrics> {
    DocumentKind::ALL
        .into_iter()
        .map(|kind| (kind, KindMetrics::default()))
        .collect()
}

/// Thread-safe metrics shared by both stages through an `Arc`.
///
/// A single lock guards all kinds; each operation holds it only for a
/// constant-time update.
#[derive(Debug)]
pub struct MetricsAggregator {
    kinds: Mutex<BTreeMap<DocumentKind, KindMetrics>>,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self {
            kinds: Mutex::new(empty_kinds()),
        }
    }

    /// Record a persisted document and how long its extraction took
    pub fn record_success(&self, kind: DocumentKind, duration: Duration) {
        let mut kinds = self.kinds.lock();
        let metrics = kinds.entry(kind).or_default();
        metrics.success_count += 1;
        metrics.durations.push(duration);
    }

    /// Record a document that failed at either stage
    pub fn record_error(&self, kind: DocumentKind) {
        let mut kinds = self.kinds.lock();
        kinds.entry(kind).or_default().error_count += 1;
    }

    /// Copy the current state
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            kinds: self.kinds.lock().clone(),
        }
    }
}
