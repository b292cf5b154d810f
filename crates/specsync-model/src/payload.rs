//! Write-shape payloads sent to the design store.
//!
//! The nested `SpecDetails` groups mirror the spec field groups. Optional
//! fields are omitted from the wire when absent, so a suppressed field and
//! a never-provided field serialize identically.

use serde::{Deserialize, Serialize};

/// Item-group detail fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_trans: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_type: Option<String>,
}

/// Navigation-group detail fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_frame_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Validation-group detail fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Database-group detail fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The nested spec detail groups stored on a design item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One design-item upsert row.
///
/// `section_link_id`, `node_link_id` and `file_id` together form the
/// conflict key on the remote side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub status: String,
    pub node_link_id: String,
    pub section_link_id: String,
    pub frame_id: i64,
    pub file_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<SpecDetails>,
}
