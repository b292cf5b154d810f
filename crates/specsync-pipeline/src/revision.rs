//! Best-effort audit-revision tracking.
//!
//! Revisions are a side channel: any failure here is logged and swallowed
//! so the upload outcome stands.

use crate::reconcile::ValidatedSpec;
use specsync_model::{
    REVISION_CHANGE_TYPE_USER, Revision, SpecProjection, User, WrittenRecord, projections_equal,
};
use specsync_remote::DesignStore;
use std::collections::BTreeMap;

/// Decide which written records need an audit entry.
///
/// New records always do. Updated records only when the pre-write stored
/// projection differs from the post-write one; a status-only transition
/// leaves the projection intact and produces no revision.
pub fn plan_revisions(
    written: &[WrittenRecord],
    validated_by_key: &BTreeMap<&str, &ValidatedSpec>,
    user: &User,
) -> Vec<Revision> {
    written
        .iter()
        .filter_map(|record| {
            let row = validated_by_key.get(record.node_link_id.as_str())?;
            let needs_revision = row.is_new || {
                let before = row.existing.as_ref().map(SpecProjection::of_existing);
                let after = SpecProjection::of_spec(&row.spec);
                !projections_equal(Some(&after), before.as_ref())
            };
            needs_revision.then(|| Revision {
                design_item_id: record.id,
                status: record.status.clone(),
                specs: record.specs.clone(),
                item_type: record.item_type.clone(),
                name: record.name.clone(),
                change_type: REVISION_CHANGE_TYPE_USER.to_string(),
                user_id: user.id,
            })
        })
        .collect()
}

/// Resolve the actor and insert the planned revisions.
///
/// Returns the number of inserted rows; every failure path degrades to a
/// warning and zero.
pub fn record_revisions(
    store: &dyn DesignStore,
    actor: Option<&str>,
    written: &[WrittenRecord],
    validated_by_key: &BTreeMap<&str, &ValidatedSpec>,
) -> u64 {
    let Some(email) = actor else {
        tracing::debug!("no actor configured; skipping revision tracking");
        return 0;
    };

    let user = match store.get_user_by_email(email) {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(email, "actor not found in the design store; skipping revisions");
            return 0;
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to resolve actor; skipping revisions");
            return 0;
        }
    };

    let revisions = plan_revisions(written, validated_by_key, &user);
    if revisions.is_empty() {
        return 0;
    }

    match store.insert_revisions(&revisions) {
        Ok(count) => {
            tracing::debug!(count, "inserted design-item revisions");
            count
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to insert revisions; upload still succeeds");
            0
        }
    }
}
