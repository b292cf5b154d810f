//! Lifecycle status determination.

use crate::rules::validate;
use specsync_model::{ItemStatus, Spec};

/// Resolve the strictest satisfiable status for a spec.
///
/// Fixed evaluation order:
/// 1. all content fields absent → `none`, no violations
/// 2. zero violations under `completed` → `completed`
/// 3. zero violations under `draft` → `draft`
/// 4. otherwise `draft` carrying draft's violations
///
/// When both levels fail, only the draft-level violations surface;
/// completed's are discarded with the failed attempt.
pub fn determine_status(spec: &Spec) -> (ItemStatus, Vec<String>) {
    if spec.is_content_empty() {
        return (ItemStatus::None, Vec::new());
    }

    let completed = validate(spec, ItemStatus::Completed);
    if completed.is_empty() {
        return (ItemStatus::Completed, Vec::new());
    }

    let draft = validate(spec, ItemStatus::Draft);
    if draft.is_empty() {
        return (ItemStatus::Draft, Vec::new());
    }

    (ItemStatus::Draft, draft)
}
