//! Item-type vocabulary and the per-type field-group activity table.
//!
//! The activity predicates on `ItemType` are the single source of truth
//! for which field groups apply to a given type. The validator and the
//! payload transformer both consult them, so the two cannot drift.

/// Kind of design item a spec row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Button,
    Checkbox,
    RadioButton,
    Dropdown,
    FileOrImage,
    Video,
    DatePicker,
    Pagination,
    PopupDialog,
    Label,
    TextForm,
    Textarea,
    Others,
}

impl ItemType {
    pub const ALL: [ItemType; 13] = [
        ItemType::Button,
        ItemType::Checkbox,
        ItemType::RadioButton,
        ItemType::Dropdown,
        ItemType::FileOrImage,
        ItemType::Video,
        ItemType::DatePicker,
        ItemType::Pagination,
        ItemType::PopupDialog,
        ItemType::Label,
        ItemType::TextForm,
        ItemType::Textarea,
        ItemType::Others,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Button => "button",
            ItemType::Checkbox => "checkbox",
            ItemType::RadioButton => "radio_button",
            ItemType::Dropdown => "dropdown",
            ItemType::FileOrImage => "file_or_image",
            ItemType::Video => "video",
            ItemType::DatePicker => "date_picker",
            ItemType::Pagination => "pagination",
            ItemType::PopupDialog => "popup_dialog",
            ItemType::Label => "label",
            ItemType::TextForm => "text_form",
            ItemType::Textarea => "textarea",
            ItemType::Others => "others",
        }
    }

    /// Parse an item type tag; unrecognized tags yield `None`.
    pub fn parse(value: &str) -> Option<ItemType> {
        ItemType::ALL.iter().copied().find(|t| t.as_str() == value)
    }

    /// Types whose validation group carries a data type.
    pub fn requires_data_type(self) -> bool {
        matches!(self, ItemType::Textarea | ItemType::TextForm | ItemType::Others)
    }

    /// Types whose validation group carries min/max length bounds.
    pub fn requires_length(self) -> bool {
        matches!(
            self,
            ItemType::Textarea
                | ItemType::TextForm
                | ItemType::FileOrImage
                | ItemType::Video
                | ItemType::Others
        )
    }

    /// Types that carry no validation group at all.
    pub fn skips_validation(self) -> bool {
        matches!(self, ItemType::Button | ItemType::Label)
    }

    /// Types whose database mapping group applies.
    pub fn requires_database(self) -> bool {
        !matches!(self, ItemType::Button)
    }
}

/// Button presentation variant, relevant when the item type is `button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonType {
    IconText,
    Toggle,
    TextLink,
    Others,
}

impl ButtonType {
    pub const ALL: [ButtonType; 4] = [
        ButtonType::IconText,
        ButtonType::Toggle,
        ButtonType::TextLink,
        ButtonType::Others,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ButtonType::IconText => "icon_text",
            ButtonType::Toggle => "toggle",
            ButtonType::TextLink => "text_link",
            ButtonType::Others => "others",
        }
    }

    pub fn parse(value: &str) -> Option<ButtonType> {
        ButtonType::ALL.iter().copied().find(|t| t.as_str() == value)
    }
}

/// Scalar data type carried by form-bearing items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Array,
    Boolean,
    Byte,
    Character,
    String,
    Date,
    Integer,
    Long,
    Short,
    Float,
    Double,
    Nothing,
}

impl DataType {
    pub const ALL: [DataType; 12] = [
        DataType::Array,
        DataType::Boolean,
        DataType::Byte,
        DataType::Character,
        DataType::String,
        DataType::Date,
        DataType::Integer,
        DataType::Long,
        DataType::Short,
        DataType::Float,
        DataType::Double,
        DataType::Nothing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Array => "array",
            DataType::Boolean => "boolean",
            DataType::Byte => "byte",
            DataType::Character => "character",
            DataType::String => "string",
            DataType::Date => "date",
            DataType::Integer => "integer",
            DataType::Long => "long",
            DataType::Short => "short",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Nothing => "nothing",
        }
    }

    pub fn parse(value: &str) -> Option<DataType> {
        DataType::ALL.iter().copied().find(|t| t.as_str() == value)
    }
}

/// User interaction that triggers a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    OnClick,
    WhileHovering,
    KeyGamepad,
    AfterDelay,
}

impl ActionType {
    pub const ALL: [ActionType; 4] = [
        ActionType::OnClick,
        ActionType::WhileHovering,
        ActionType::KeyGamepad,
        ActionType::AfterDelay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::OnClick => "on_click",
            ActionType::WhileHovering => "while_hovering",
            ActionType::KeyGamepad => "key_gamepad",
            ActionType::AfterDelay => "after_delay",
        }
    }

    pub fn parse(value: &str) -> Option<ActionType> {
        ActionType::ALL.iter().copied().find(|t| t.as_str() == value)
    }
}
