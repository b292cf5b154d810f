//! Field-rule engine for spec records.
//!
//! Each rule has the shape "required-when(condition) or
//! constrained-when(present)". The only rules gated on the candidate
//! status are the two required-field rules (`type`, and `buttonType` for
//! button items); everything else fires on presence alone, which is what
//! makes `completed` strictly more demanding than `draft`.

use specsync_model::{ActionType, ButtonType, DataType, ItemStatus, ItemType, Spec};

// Length caps mirror the store's update contract.
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_NAME_TRANS_LEN: usize = 255;
pub const MAX_OTHER_TYPE_LEN: usize = 255;
pub const MAX_FORMAT_LEN: usize = 255;
pub const MAX_DEFAULT_VALUE_LEN: usize = 255;
pub const MAX_TABLE_NAME_LEN: usize = 255;
pub const MAX_COLUMN_NAME_LEN: usize = 255;
pub const MAX_NAVIGATION_NOTE_LEN: usize = 2000;
pub const MAX_VALIDATION_NOTE_LEN: usize = 2000;
pub const MAX_DATABASE_NOTE_LEN: usize = 2000;
pub const MAX_DESCRIPTION_LEN: usize = 10000;

/// Collect every violation of the field rules for `target`.
///
/// Violations come back in fixed rule order and are never short-circuited.
pub fn validate(spec: &Spec, target: ItemStatus) -> Vec<String> {
    let mut violations = Vec::new();
    let completed = target == ItemStatus::Completed;
    let item_type = spec.item_type.as_deref().and_then(ItemType::parse);

    // ── Type ──
    if completed || spec.item_type.is_some() {
        match spec.item_type.as_deref() {
            None => violations.push("type is required when status is completed".to_string()),
            Some(_) if item_type.is_none() => violations.push(format!(
                "type must be one of: {}",
                join(ItemType::ALL.iter().map(|t| t.as_str()))
            )),
            Some(_) => {}
        }
    }

    // ── Item group ──
    check_len(&mut violations, &spec.name, "name", MAX_NAME_LEN);
    check_len(
        &mut violations,
        &spec.name_translation,
        "nameTrans",
        MAX_NAME_TRANS_LEN,
    );

    let requires_button_type = item_type == Some(ItemType::Button) && completed;
    if requires_button_type || spec.button_type.is_some() {
        let recognized = spec
            .button_type
            .as_deref()
            .is_some_and(|raw| ButtonType::parse(raw).is_some());
        if !recognized {
            violations.push(format!(
                "buttonType must be one of: {}",
                join(ButtonType::ALL.iter().map(|t| t.as_str()))
            ));
        }
    }

    check_len(
        &mut violations,
        &spec.other_type,
        "otherType",
        MAX_OTHER_TYPE_LEN,
    );

    // ── Navigation group ──
    if let Some(raw) = spec.action.as_deref()
        && ActionType::parse(raw).is_none()
    {
        violations.push(format!(
            "action must be one of: {}",
            join(ActionType::ALL.iter().map(|t| t.as_str()))
        ));
    }

    check_len(
        &mut violations,
        &spec.navigation_note,
        "navigationNote",
        MAX_NAVIGATION_NOTE_LEN,
    );

    // ── Validation group ──
    if let Some(raw) = spec.data_type.as_deref()
        && DataType::parse(raw).is_none()
    {
        violations.push(format!(
            "dataType must be one of: {}",
            join(DataType::ALL.iter().map(|t| t.as_str()))
        ));
    }

    check_len(&mut violations, &spec.format, "format", MAX_FORMAT_LEN);

    if spec.min_length.is_some_and(|n| n < 0) {
        violations.push("minLength must be greater than or equal to 0".to_string());
    }
    if spec.max_length.is_some_and(|n| n < 0) {
        violations.push("maxLength must be greater than or equal to 0".to_string());
    }
    if let (Some(min), Some(max)) = (spec.min_length, spec.max_length)
        && min >= max
    {
        violations.push("minLength must be less than maxLength".to_string());
    }

    check_len(
        &mut violations,
        &spec.default_value,
        "defaultValue",
        MAX_DEFAULT_VALUE_LEN,
    );
    check_len(
        &mut violations,
        &spec.validation_note,
        "validationNote",
        MAX_VALIDATION_NOTE_LEN,
    );

    // ── Database group ──
    check_len(
        &mut violations,
        &spec.table_name,
        "tableName",
        MAX_TABLE_NAME_LEN,
    );
    check_len(
        &mut violations,
        &spec.column_name,
        "columnName",
        MAX_COLUMN_NAME_LEN,
    );
    check_len(
        &mut violations,
        &spec.database_note,
        "databaseNote",
        MAX_DATABASE_NOTE_LEN,
    );

    // ── Description ──
    check_len(
        &mut violations,
        &spec.description,
        "description",
        MAX_DESCRIPTION_LEN,
    );

    violations
}

fn check_len(violations: &mut Vec<String>, value: &Option<String>, field: &str, max: usize) {
    if value.as_deref().is_some_and(|v| v.chars().count() > max) {
        violations.push(format!("{field} must not exceed {max} characters"));
    }
}

fn join<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values.into_iter().collect::<Vec<_>>().join(", ")
}
