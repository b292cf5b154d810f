//! Per-file outcome surface consumed by the reporting layer.

use specsync_model::ItemStatus;

/// Terminal outcome of reconciling one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The upsert went through; `invalid` rows were excluded from it.
    Success { written: usize, invalid: usize },
    /// Structural or transport failure; nothing further was attempted.
    Failed { reason: String },
    /// Nothing to do for this file.
    Skipped { reason: String },
}

impl FileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOutcome::Success { .. } => "success",
            FileOutcome::Failed { .. } => "failed",
            FileOutcome::Skipped { .. } => "skipped",
        }
    }
}

/// What happened to one sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDisposition {
    /// Included in the upsert batch.
    Written,
    /// Identical to remote state; neither written nor reported as an error.
    Unchanged,
    /// Excluded from the write set, violations attached.
    Invalid,
    /// Valid, but a later row with the same natural key won the write slot.
    Superseded,
}

impl RowDisposition {
    pub fn as_str(self) -> &'static str {
        match self {
            RowDisposition::Written => "written",
            RowDisposition::Unchanged => "unchanged",
            RowDisposition::Invalid => "invalid",
            RowDisposition::Superseded => "superseded",
        }
    }
}

/// Row-level detail aggregated into the file report.
#[derive(Debug, Clone)]
pub struct RowReport {
    /// Sheet line number; the header occupies line 1.
    pub line: usize,
    pub node_link_id: Option<String>,
    pub status: ItemStatus,
    pub disposition: RowDisposition,
    pub violations: Vec<String>,
}

/// Outcome plus per-row detail for one sheet.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub outcome: FileOutcome,
    pub rows: Vec<RowReport>,
}

impl FileReport {
    pub fn failed(reason: impl Into<String>) -> FileReport {
        FileReport {
            outcome: FileOutcome::Failed {
                reason: reason.into(),
            },
            rows: Vec::new(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> FileReport {
        FileReport {
            outcome: FileOutcome::Skipped {
                reason: reason.into(),
            },
            rows: Vec::new(),
        }
    }
}
