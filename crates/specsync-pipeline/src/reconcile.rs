//! Per-file reconciliation state machine.
//!
//! One sheet in, one `FileReport` out. Remote calls happen in a fixed
//! order — frame lookup, batch fetch, linked-frame check, upsert,
//! revision insert — and a transport failure aborts the file from that
//! point; nothing already written is rolled back.

use crate::linked::check_linked_frames;
use crate::report::{FileOutcome, FileReport, RowDisposition, RowReport};
use crate::revision::record_revisions;
use crate::transform::{build_payload, resolve_section_link_id};
use specsync_model::{
    ExistingRecord, ItemStatus, SheetError, Spec, SpecPayload, SpecProjection, parse_specs,
    projections_equal,
};
use specsync_remote::DesignStore;
use specsync_validate::determine_status;
use std::collections::BTreeMap;
use std::io::Read;

/// Fixed violation attached to rows whose stored record is deleted.
pub const DELETED_RECORD_VIOLATION: &str =
    "existing design item is deleted; restore it before uploading";

/// Fixed violation attached to rows that carry no natural key.
pub const MISSING_NODE_LINK_VIOLATION: &str = "row has no itemId; design items cannot be matched";

/// Frames still in this status do not accept spec uploads.
pub const FRAME_STATUS_DESIGN: &str = "design";

/// A spec row after status determination and change detection.
#[derive(Debug, Clone)]
pub struct ValidatedSpec {
    pub spec: Spec,
    /// Sheet line number; the header occupies line 1.
    pub line: usize,
    pub status: ItemStatus,
    pub violations: Vec<String>,
    pub is_valid: bool,
    pub changed: bool,
    pub is_new: bool,
    pub existing: Option<ExistingRecord>,
}

impl ValidatedSpec {
    fn row_report(&self, disposition: RowDisposition) -> RowReport {
        RowReport {
            line: self.line,
            node_link_id: self.spec.node_link_id.clone(),
            status: self.status,
            disposition,
            violations: self.violations.clone(),
        }
    }
}

/// Reconcile one sheet against the store.
///
/// Parsing, frame resolution and the existing-record fetch are
/// file-fatal; row problems never are. Rows identical to remote state are
/// skipped without error, and a file where nothing survives reports
/// `Skipped` (nothing changed) or `Failed` (everything invalid) so the
/// caller can tell the two apart.
pub fn reconcile_file(
    store: &dyn DesignStore,
    file_key: &str,
    frame_id: &str,
    sheet: impl Read,
    actor: Option<&str>,
) -> FileReport {
    let specs = match parse_specs(sheet) {
        Ok(specs) => specs,
        Err(SheetError::Empty) => return FileReport::skipped("sheet has no data rows"),
        Err(e) => return FileReport::failed(format!("failed to parse sheet: {e}")),
    };

    let frame = match store.get_frame(file_key, frame_id) {
        Ok(Some(frame)) => frame,
        Ok(None) => {
            return FileReport::failed(format!(
                "frame not found: file_key={file_key}, frame_id={frame_id}"
            ));
        }
        Err(e) => return FileReport::failed(format!("frame lookup failed: {e}")),
    };
    if frame.status == FRAME_STATUS_DESIGN {
        return FileReport::failed(format!(
            "frame {} is still in design status and does not accept spec uploads",
            frame.link_id
        ));
    }

    let node_link_ids = unique_node_link_ids(&specs);
    let existing_by_key: BTreeMap<String, ExistingRecord> = if node_link_ids.is_empty() {
        BTreeMap::new()
    } else {
        match store.list_records(file_key, frame_id, &node_link_ids) {
            Ok(records) => records
                .into_iter()
                .map(|record| (record.node_link_id.clone(), record))
                .collect(),
            Err(e) => {
                return FileReport::failed(format!("failed to fetch existing design items: {e}"));
            }
        }
    };

    // Classify every row; unchanged rows drop out here.
    let mut unchanged: Vec<ValidatedSpec> = Vec::new();
    let mut valid: Vec<ValidatedSpec> = Vec::new();
    let mut invalid: Vec<ValidatedSpec> = Vec::new();

    for (idx, spec) in specs.into_iter().enumerate() {
        let line = idx + 2;
        let row = classify_row(spec, line, &existing_by_key);

        if !row.changed
            && let Some(existing) = &row.existing
            && existing.status == row.status.as_str()
        {
            unchanged.push(row);
        } else if row.is_valid {
            valid.push(row);
        } else {
            invalid.push(row);
        }
    }

    let (valid, newly_invalid) = match check_linked_frames(store, file_key, valid) {
        Ok(pair) => pair,
        Err(e) => return FileReport::failed(format!("linked-frame check failed: {e}")),
    };
    invalid.extend(newly_invalid);

    if valid.is_empty() {
        let rows = collect_rows(unchanged, valid, &[], invalid);
        if rows.iter().any(|r| r.disposition == RowDisposition::Invalid) {
            let invalid_count = rows
                .iter()
                .filter(|r| r.disposition == RowDisposition::Invalid)
                .count();
            return FileReport {
                outcome: FileOutcome::Failed {
                    reason: format!("no valid rows to upload ({invalid_count} invalid)"),
                },
                rows,
            };
        }
        return FileReport {
            outcome: FileOutcome::Skipped {
                reason: "no changes to upload".to_string(),
            },
            rows,
        };
    }

    // Duplicate natural keys: every row was checked, the last valid one
    // wins the write slot.
    let written_indices = last_occurrence_indices(&valid);
    let writable: Vec<&ValidatedSpec> = written_indices.iter().map(|&i| &valid[i]).collect();

    let payloads: Vec<SpecPayload> = writable
        .iter()
        .map(|row| {
            let section_link_id =
                resolve_section_link_id(&row.spec, row.existing.as_ref(), &frame);
            build_payload(&row.spec, &frame, section_link_id, row.status)
        })
        .collect();

    let written = match store.upsert_specs(&payloads) {
        Ok(written) => written,
        Err(e) => return FileReport::failed(format!("failed to upsert design items: {e}")),
    };
    tracing::debug!(count = written.len(), frame = %frame.link_id, "upserted design items");

    let by_key: BTreeMap<&str, &ValidatedSpec> = writable
        .iter()
        .filter_map(|row| row.spec.node_link_id.as_deref().map(|key| (key, *row)))
        .collect();
    record_revisions(store, actor, &written, &by_key);

    let invalid_count = invalid.len();
    let rows = collect_rows(unchanged, valid, &written_indices, invalid);
    FileReport {
        outcome: FileOutcome::Success {
            written: written.len(),
            invalid: invalid_count,
        },
        rows,
    }
}

fn classify_row(
    spec: Spec,
    line: usize,
    existing_by_key: &BTreeMap<String, ExistingRecord>,
) -> ValidatedSpec {
    let existing = spec
        .node_link_id
        .as_deref()
        .and_then(|key| existing_by_key.get(key))
        .cloned();

    let changed = !projections_equal(
        Some(&SpecProjection::of_spec(&spec)),
        existing
            .as_ref()
            .map(SpecProjection::of_existing)
            .as_ref(),
    );
    let is_new = existing.is_none();

    if spec.node_link_id.is_none() {
        return ValidatedSpec {
            status: determine_status(&spec).0,
            violations: vec![MISSING_NODE_LINK_VIOLATION.to_string()],
            is_valid: false,
            changed,
            is_new,
            existing,
            spec,
            line,
        };
    }

    if existing
        .as_ref()
        .is_some_and(|record| record.status == ItemStatus::Deleted.as_str())
    {
        return ValidatedSpec {
            status: determine_status(&spec).0,
            violations: vec![DELETED_RECORD_VIOLATION.to_string()],
            is_valid: false,
            changed,
            is_new,
            existing,
            spec,
            line,
        };
    }

    let (status, violations) = determine_status(&spec);
    ValidatedSpec {
        is_valid: violations.is_empty(),
        status,
        violations,
        changed,
        is_new,
        existing,
        spec,
        line,
    }
}

fn unique_node_link_ids(specs: &[Spec]) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    specs
        .iter()
        .filter_map(|spec| spec.node_link_id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Indices (in order) of the last row holding each natural key.
fn last_occurrence_indices(valid: &[ValidatedSpec]) -> Vec<usize> {
    let mut last_by_key: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, row) in valid.iter().enumerate() {
        if let Some(key) = row.spec.node_link_id.as_deref() {
            last_by_key.insert(key, idx);
        }
    }
    let mut indices: Vec<usize> = last_by_key.into_values().collect();
    indices.sort_unstable();
    indices
}

fn collect_rows(
    unchanged: Vec<ValidatedSpec>,
    valid: Vec<ValidatedSpec>,
    written_indices: &[usize],
    invalid: Vec<ValidatedSpec>,
) -> Vec<RowReport> {
    let mut rows: Vec<RowReport> = Vec::new();
    rows.extend(
        unchanged
            .iter()
            .map(|row| row.row_report(RowDisposition::Unchanged)),
    );
    rows.extend(valid.iter().enumerate().map(|(idx, row)| {
        let disposition = if written_indices.contains(&idx) {
            RowDisposition::Written
        } else {
            RowDisposition::Superseded
        };
        row.row_report(disposition)
    }));
    rows.extend(
        invalid
            .iter()
            .map(|row| row.row_report(RowDisposition::Invalid)),
    );
    rows.sort_by_key(|row| row.line);
    rows
}
