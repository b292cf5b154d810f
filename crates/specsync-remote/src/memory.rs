//! Deterministic in-memory design store.
//!
//! Models one file's worth of remote state: frames, design items keyed by
//! `node_link_id`, and users. Upserts mutate the record map the way the
//! real store would, so a second reconciliation run observes its own
//! writes. Failure injection covers the transport-fatal paths.

use crate::{DesignStore, RemoteError};
use specsync_model::{ExistingRecord, Frame, Revision, SpecPayload, User, WrittenRecord};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    frames: Vec<Frame>,
    link_ids: BTreeSet<String>,
    records: BTreeMap<String, ExistingRecord>,
    users: Vec<User>,
    written: Vec<SpecPayload>,
    revisions: Vec<Revision>,
    next_id: i64,
    fail_upserts: bool,
    fail_revisions: bool,
}

/// In-memory `DesignStore`, scoped to a single file key.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> MemoryStore {
        MemoryStore::new()
    }
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore {
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    pub fn add_frame(&self, frame: Frame) {
        let mut inner = self.lock();
        inner.link_ids.insert(frame.link_id.clone());
        inner.frames.push(frame);
    }

    /// Register a frame link id that resolves without a full frame record.
    pub fn add_linked_frame(&self, link_id: impl Into<String>) {
        self.lock().link_ids.insert(link_id.into());
    }

    pub fn add_record(&self, record: ExistingRecord) {
        self.lock()
            .records
            .insert(record.node_link_id.clone(), record);
    }

    pub fn add_user(&self, user: User) {
        self.lock().users.push(user);
    }

    pub fn fail_upserts(&self) {
        self.lock().fail_upserts = true;
    }

    pub fn fail_revisions(&self) {
        self.lock().fail_revisions = true;
    }

    /// Every payload accepted by `upsert_specs`, in write order.
    pub fn written_payloads(&self) -> Vec<SpecPayload> {
        self.lock().written.clone()
    }

    /// Every revision accepted by `insert_revisions`, in insert order.
    pub fn inserted_revisions(&self) -> Vec<Revision> {
        self.lock().revisions.clone()
    }

    /// Current stored record for a node link id, if any.
    pub fn record(&self, node_link_id: &str) -> Option<ExistingRecord> {
        self.lock().records.get(node_link_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store mutex poisoned")
    }
}

impl DesignStore for MemoryStore {
    fn get_frame(&self, _file_key: &str, frame_id: &str) -> Result<Option<Frame>, RemoteError> {
        // The double models a single file, so the key is not consulted.
        Ok(self
            .lock()
            .frames
            .iter()
            .find(|frame| frame.link_id == frame_id)
            .cloned())
    }

    fn list_records(
        &self,
        _file_key: &str,
        _frame_id: &str,
        node_link_ids: &[String],
    ) -> Result<Vec<ExistingRecord>, RemoteError> {
        let wanted: BTreeSet<&str> = node_link_ids.iter().map(String::as_str).collect();
        Ok(self
            .lock()
            .records
            .values()
            .filter(|record| wanted.contains(record.node_link_id.as_str()))
            .cloned()
            .collect())
    }

    fn list_frames_by_link_ids(
        &self,
        _file_key: &str,
        link_ids: &[String],
    ) -> Result<Vec<String>, RemoteError> {
        let inner = self.lock();
        Ok(link_ids
            .iter()
            .filter(|id| inner.link_ids.contains(*id))
            .cloned()
            .collect())
    }

    fn upsert_specs(&self, payloads: &[SpecPayload]) -> Result<Vec<WrittenRecord>, RemoteError> {
        let mut inner = self.lock();
        if inner.fail_upserts {
            return Err(RemoteError::Transport("injected upsert failure".to_string()));
        }

        let mut written = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let existing_id = inner.records.get(&payload.node_link_id).map(|r| r.id);
            let id = match existing_id {
                Some(id) => id,
                None => {
                    let id = inner.next_id;
                    inner.next_id += 1;
                    id
                }
            };

            inner.records.insert(
                payload.node_link_id.clone(),
                ExistingRecord {
                    id,
                    no: payload.no.clone(),
                    name: payload.name.clone(),
                    item_type: payload.item_type.clone(),
                    node_link_id: payload.node_link_id.clone(),
                    section_link_id: Some(payload.section_link_id.clone()),
                    frame_id: payload.frame_id,
                    status: payload.status.clone(),
                    specs: payload.specs.clone(),
                },
            );

            written.push(WrittenRecord {
                id,
                no: payload.no.clone(),
                name: payload.name.clone(),
                item_type: payload.item_type.clone(),
                node_link_id: payload.node_link_id.clone(),
                status: payload.status.clone(),
                specs: payload.specs.clone(),
            });
            inner.written.push(payload.clone());
        }
        Ok(written)
    }

    fn insert_revisions(&self, revisions: &[Revision]) -> Result<u64, RemoteError> {
        let mut inner = self.lock();
        if inner.fail_revisions {
            return Err(RemoteError::Transport(
                "injected revision failure".to_string(),
            ));
        }
        inner.revisions.extend_from_slice(revisions);
        Ok(revisions.len() as u64)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RemoteError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }
}
