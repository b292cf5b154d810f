//! Payload transformation: validated spec → write shape.
//!
//! Suppression follows the same `ItemType` activity table the validator
//! consults, so a field never reaches the wire unless it was also in
//! scope for validation.

use specsync_model::{
    DatabaseDetails, ExistingRecord, Frame, ItemDetails, ItemStatus, ItemType, NavigationDetails,
    Spec, SpecDetails, SpecPayload, ValidationDetails,
};

/// Build the upsert row for one spec.
///
/// Fields outside the active rule set for the row's type are sent absent
/// rather than echoing the raw sheet value.
pub fn build_payload(
    spec: &Spec,
    frame: &Frame,
    section_link_id: String,
    status: ItemStatus,
) -> SpecPayload {
    let item_type = spec.item_type.as_deref().and_then(ItemType::parse);
    let is_button = item_type == Some(ItemType::Button);
    let is_others = item_type == Some(ItemType::Others);
    let carries_data_type = item_type.is_some_and(ItemType::requires_data_type);
    let carries_length = item_type.is_some_and(ItemType::requires_length);
    let skips_validation = item_type.is_some_and(ItemType::skips_validation);
    // Unknown types keep their database mapping; only buttons drop it.
    let carries_database = item_type.is_none_or(ItemType::requires_database);

    let specs = SpecDetails {
        item: Some(ItemDetails {
            name: spec.name.clone(),
            name_trans: spec.name_translation.clone(),
            button_type: is_button.then(|| spec.button_type.clone()).flatten(),
            other_type: is_others.then(|| spec.other_type.clone()).flatten(),
        }),
        navigation: Some(NavigationDetails {
            action: spec.action.clone(),
            // A linked frame is only meaningful under an action.
            linked_frame_id: spec
                .action
                .is_some()
                .then(|| spec.linked_frame_id.clone())
                .flatten(),
            note: spec.navigation_note.clone(),
        }),
        validation: Some(ValidationDetails {
            data_type: carries_data_type.then(|| spec.data_type.clone()).flatten(),
            required: (!skips_validation).then_some(spec.required).flatten(),
            format: (!skips_validation).then(|| spec.format.clone()).flatten(),
            min_length: carries_length.then_some(spec.min_length).flatten(),
            max_length: carries_length.then_some(spec.max_length).flatten(),
            default_value: spec.default_value.clone(),
            note: spec.validation_note.clone(),
        }),
        database: Some(DatabaseDetails {
            table_name: carries_database.then(|| spec.table_name.clone()).flatten(),
            column_name: carries_database.then(|| spec.column_name.clone()).flatten(),
            note: spec.database_note.clone(),
        }),
        description: spec.description.clone(),
    };

    SpecPayload {
        no: spec.no.clone(),
        name: spec.item_name.clone(),
        item_type: spec.item_type.clone(),
        status: status.as_str().to_string(),
        node_link_id: spec.node_link_id.clone().unwrap_or_default(),
        section_link_id,
        frame_id: frame.id,
        file_id: frame.file_id,
        specs: Some(specs),
    }
}

/// Resolve the section link for a row: explicit sheet value, then the
/// existing record's stored value, then the frame's own link id.
pub fn resolve_section_link_id(
    spec: &Spec,
    existing: Option<&ExistingRecord>,
    frame: &Frame,
) -> String {
    spec.section_link_id
        .clone()
        .or_else(|| existing.and_then(|record| record.section_link_id.clone()))
        .unwrap_or_else(|| frame.link_id.clone())
}
