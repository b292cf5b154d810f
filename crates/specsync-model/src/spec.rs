//! Spec record: one sheet row in canonical form.

/// A single design-spec row, scoped to a frame by its `node_link_id`.
///
/// Every field is optional. A blank-after-trim or missing cell is `None`;
/// there is no `Some("")` state coming out of the parser. Numeric and
/// boolean fields stay `None` when the cell does not parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spec {
    // ── Identity ──
    pub no: Option<String>,
    pub item_name: Option<String>,
    pub node_link_id: Option<String>,
    pub section_link_id: Option<String>,

    // ── Item kind ──
    pub name: Option<String>,
    pub name_translation: Option<String>,
    pub item_type: Option<String>,
    pub button_type: Option<String>,
    pub other_type: Option<String>,

    // ── Navigation ──
    pub action: Option<String>,
    pub linked_frame_id: Option<String>,
    pub navigation_note: Option<String>,

    // ── Validation rules ──
    pub data_type: Option<String>,
    pub required: Option<bool>,
    pub format: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub default_value: Option<String>,
    pub validation_note: Option<String>,

    // ── Database mapping ──
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    pub database_note: Option<String>,

    pub description: Option<String>,
}

impl Spec {
    /// Whether every content field is absent.
    ///
    /// Structural fields (`no`, `item_name`, `node_link_id`,
    /// `section_link_id`) and `item_type` are excluded: a row carrying only
    /// those resolves to status `none` regardless of its type tag.
    pub fn is_content_empty(&self) -> bool {
        self.name.is_none()
            && self.name_translation.is_none()
            && self.button_type.is_none()
            && self.other_type.is_none()
            && self.action.is_none()
            && self.linked_frame_id.is_none()
            && self.navigation_note.is_none()
            && self.data_type.is_none()
            && self.required.is_none()
            && self.format.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.default_value.is_none()
            && self.validation_note.is_none()
            && self.table_name.is_none()
            && self.column_name.is_none()
            && self.database_note.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_content_empty() {
        assert!(Spec::default().is_content_empty());
    }

    #[test]
    fn structural_fields_do_not_count_as_content() {
        let spec = Spec {
            no: Some("1".to_string()),
            item_name: Some("Login button".to_string()),
            node_link_id: Some("10:2".to_string()),
            section_link_id: Some("5:1".to_string()),
            item_type: Some("button".to_string()),
            ..Spec::default()
        };
        assert!(spec.is_content_empty());
    }

    #[test]
    fn any_content_field_breaks_emptiness() {
        let spec = Spec {
            description: Some("submits the form".to_string()),
            ..Spec::default()
        };
        assert!(!spec.is_content_empty());

        let spec = Spec {
            required: Some(false),
            ..Spec::default()
        };
        assert!(!spec.is_content_empty());
    }
}
