//! Core types for the extraction pipeline

pub mod document;
pub mod work_item;

pub use document::DocumentKind;
pub use work_item::{HandoffItem, IntakeItem};
