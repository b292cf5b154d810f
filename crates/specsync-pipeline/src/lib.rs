//! # specsync-pipeline
//!
//! Reconciliation of one sheet against the design store:
//! - `reconcile::reconcile_file` runs the whole per-file state machine
//! - `transform::build_payload` maps a validated spec into the write shape
//! - `linked::check_linked_frames` batch-verifies cross-frame references
//! - `revision::record_revisions` appends the best-effort audit trail
//!
//! Everything is synchronous; each remote call blocks and happens at most
//! once per file. Batch sequencing across files, and cancellation between
//! them, belong to the caller.

pub mod linked;
pub mod reconcile;
pub mod report;
pub mod revision;
pub mod transform;

pub use linked::check_linked_frames;
pub use reconcile::{
    DELETED_RECORD_VIOLATION, FRAME_STATUS_DESIGN, MISSING_NODE_LINK_VIOLATION, ValidatedSpec,
    reconcile_file,
};
pub use report::{FileOutcome, FileReport, RowDisposition, RowReport};
pub use revision::{plan_revisions, record_revisions};
pub use transform::{build_payload, resolve_section_link_id};
