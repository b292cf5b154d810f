//! Flat comparison projection over spec content fields.
//!
//! Change detection and revision decisions both reduce to structural
//! equality of two projections. Field-by-field, value equality; an absent
//! field never equals a present one.

use crate::record::ExistingRecord;
use crate::spec::Spec;

/// Canonical key→value view of a spec's content fields.
///
/// Built either from a parsed sheet row or from the nested detail groups
/// of a stored record, so the two sides always compare over the same
/// field set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecProjection {
    pub name: Option<String>,
    pub name_translation: Option<String>,
    pub item_type: Option<String>,
    pub button_type: Option<String>,
    pub other_type: Option<String>,
    pub action: Option<String>,
    pub linked_frame_id: Option<String>,
    pub navigation_note: Option<String>,
    pub data_type: Option<String>,
    pub required: Option<bool>,
    pub format: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub default_value: Option<String>,
    pub validation_note: Option<String>,
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    pub database_note: Option<String>,
    pub description: Option<String>,
}

impl SpecProjection {
    /// Project a parsed sheet row.
    pub fn of_spec(spec: &Spec) -> SpecProjection {
        SpecProjection {
            name: spec.name.clone(),
            name_translation: spec.name_translation.clone(),
            item_type: spec.item_type.clone(),
            button_type: spec.button_type.clone(),
            other_type: spec.other_type.clone(),
            action: spec.action.clone(),
            linked_frame_id: spec.linked_frame_id.clone(),
            navigation_note: spec.navigation_note.clone(),
            data_type: spec.data_type.clone(),
            required: spec.required,
            format: spec.format.clone(),
            min_length: spec.min_length,
            max_length: spec.max_length,
            default_value: spec.default_value.clone(),
            validation_note: spec.validation_note.clone(),
            table_name: spec.table_name.clone(),
            column_name: spec.column_name.clone(),
            database_note: spec.database_note.clone(),
            description: spec.description.clone(),
        }
    }

    /// Project a stored record by flattening its nested detail groups.
    pub fn of_existing(record: &ExistingRecord) -> SpecProjection {
        let specs = record.specs.as_ref();
        let item = specs.and_then(|s| s.item.as_ref());
        let navigation = specs.and_then(|s| s.navigation.as_ref());
        let validation = specs.and_then(|s| s.validation.as_ref());
        let database = specs.and_then(|s| s.database.as_ref());

        SpecProjection {
            name: item.and_then(|i| i.name.clone()),
            name_translation: item.and_then(|i| i.name_trans.clone()),
            item_type: record.item_type.clone(),
            button_type: item.and_then(|i| i.button_type.clone()),
            other_type: item.and_then(|i| i.other_type.clone()),
            action: navigation.and_then(|n| n.action.clone()),
            linked_frame_id: navigation.and_then(|n| n.linked_frame_id.clone()),
            navigation_note: navigation.and_then(|n| n.note.clone()),
            data_type: validation.and_then(|v| v.data_type.clone()),
            required: validation.and_then(|v| v.required),
            format: validation.and_then(|v| v.format.clone()),
            min_length: validation.and_then(|v| v.min_length),
            max_length: validation.and_then(|v| v.max_length),
            default_value: validation.and_then(|v| v.default_value.clone()),
            validation_note: validation.and_then(|v| v.note.clone()),
            table_name: database.and_then(|d| d.table_name.clone()),
            column_name: database.and_then(|d| d.column_name.clone()),
            database_note: database.and_then(|d| d.note.clone()),
            description: specs.and_then(|s| s.description.clone()),
        }
    }
}

/// Structural equality over optional projections.
///
/// Two absent projections are equal; one absent and one present never are.
pub fn projections_equal(
    current: Option<&SpecProjection>,
    previous: Option<&SpecProjection>,
) -> bool {
    match (current, previous) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
