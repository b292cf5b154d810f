//! # specsync-remote
//!
//! The design-store boundary. The pipeline only ever talks to the
//! `DesignStore` trait; this crate ships two implementations:
//! - `GraphQlStore`: blocking GraphQL-over-HTTP against the real store
//! - `MemoryStore`: deterministic in-memory double for tests
//!
//! Retry/backoff is deliberately absent. Every method maps to exactly one
//! remote round trip, and batched methods exist precisely to keep it that
//! way.

mod graphql;
mod memory;

pub use graphql::GraphQlStore;
pub use memory::MemoryStore;

use specsync_model::{ExistingRecord, Frame, Revision, SpecPayload, User, WrittenRecord};

/// Errors surfaced by a design-store implementation.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("store rejected request: {0}")]
    Rejected(String),

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Synchronous design-store operations consumed by the pipeline.
pub trait DesignStore {
    /// Resolve a frame by its natural key.
    fn get_frame(&self, file_key: &str, frame_id: &str) -> Result<Option<Frame>, RemoteError>;

    /// Fetch existing design items for the given node link ids in one call.
    fn list_records(
        &self,
        file_key: &str,
        frame_id: &str,
        node_link_ids: &[String],
    ) -> Result<Vec<ExistingRecord>, RemoteError>;

    /// Return the subset of `link_ids` that name an existing frame.
    fn list_frames_by_link_ids(
        &self,
        file_key: &str,
        link_ids: &[String],
    ) -> Result<Vec<String>, RemoteError>;

    /// Batched upsert, conflict-resolved on
    /// `(section_link_id, node_link_id, file_id)`.
    fn upsert_specs(&self, payloads: &[SpecPayload]) -> Result<Vec<WrittenRecord>, RemoteError>;

    /// Append audit revisions; returns the number of inserted rows.
    fn insert_revisions(&self, revisions: &[Revision]) -> Result<u64, RemoteError>;

    /// Resolve the acting user for revision attribution.
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RemoteError>;
}
