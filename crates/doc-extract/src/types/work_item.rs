//! Items passed between pipeline stages

use std::path::PathBuf;

use super::DocumentKind;

/// A selected input file waiting for the read stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeItem {
    pub kind: DocumentKind,
    pub source_path: PathBuf,
}

impl IntakeItem {
    pub fn new(kind: DocumentKind, source_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            source_path: source_path.into(),
        }
    }
}

/// A loaded document waiting for the extraction stage.
///
/// Moved through the hand-off channel, so the receiving worker owns
/// `raw_bytes` outright.
#[derive(Debug)]
pub struct HandoffItem {
    pub kind: DocumentKind,
    pub source_path: PathBuf,
    pub raw_bytes: Vec<u8>,
}

impl HandoffItem {
    /// Attach loaded bytes to an intake item
    pub fn loaded(item: IntakeItem, raw_bytes: Vec<u8>) -> Self {
        Self {
            kind: item.kind,
            source_path: item.source_path,
            raw_bytes,
        }
    }
}
