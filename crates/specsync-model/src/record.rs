//! Wire-facing records exchanged with the design store.
//!
//! Field names follow the remote schema (snake_case, `type` renamed).

use crate::payload::SpecDetails;
use serde::{Deserialize, Serialize};

/// A frame as returned by the store's frame lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: i64,
    #[serde(rename = "frame_link_id")]
    pub link_id: String,
    pub file_id: i64,
    pub name: String,
    pub status: String,
}

/// A previously persisted design item, keyed by `node_link_id` within its
/// frame. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub node_link_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_link_id: Option<String>,
    pub frame_id: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<SpecDetails>,
}

/// The post-write shape returned by a batched upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub node_link_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<SpecDetails>,
}

/// An append-only audit entry for one written design item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub design_item_id: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<SpecDetails>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub change_type: String,
    pub user_id: i64,
}

/// Change-type tag carried by pipeline-produced revisions.
pub const REVISION_CHANGE_TYPE_USER: &str = "user";

/// The acting user resolved for revision attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}
