//! Linked-frame integrity check.

use crate::reconcile::ValidatedSpec;
use specsync_remote::{DesignStore, RemoteError};
use std::collections::BTreeSet;

/// Verify every cross-frame reference in the writable set.
///
/// One batched existence query over the unique reference set; never one
/// call per row. Rows whose reference does not resolve move to the
/// invalid side with a violation naming the missing frame.
pub fn check_linked_frames(
    store: &dyn DesignStore,
    file_key: &str,
    valid: Vec<ValidatedSpec>,
) -> Result<(Vec<ValidatedSpec>, Vec<ValidatedSpec>), RemoteError> {
    let references: BTreeSet<String> = valid
        .iter()
        .filter_map(|row| row.spec.linked_frame_id.clone())
        .collect();
    if references.is_empty() {
        return Ok((valid, Vec::new()));
    }

    let link_ids: Vec<String> = references.into_iter().collect();
    let found: BTreeSet<String> = store
        .list_frames_by_link_ids(file_key, &link_ids)?
        .into_iter()
        .collect();

    let mut still_valid = Vec::new();
    let mut newly_invalid = Vec::new();
    for mut row in valid {
        match row.spec.linked_frame_id.as_deref() {
            Some(reference) if !found.contains(reference) => {
                row.is_valid = false;
                row.violations
                    .push(format!("linked frame not found: {reference}"));
                newly_invalid.push(row);
            }
            _ => still_valid.push(row),
        }
    }
    Ok((still_valid, newly_invalid))
}
