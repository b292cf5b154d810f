//! Sheet parsing: one CSV data row per spec record.
//!
//! Header cells are matched case-sensitively against the fixed source
//! column dictionary; column order is arbitrary and unknown columns are
//! ignored. A missing column or blank cell yields an absent field.

use crate::spec::Spec;
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;

// Source column dictionary. The sheet template names its columns after the
// design-tool export, not after the store schema.
pub const COL_NO: &str = "No";
pub const COL_ITEM_NAME: &str = "itemName";
pub const COL_NAME: &str = "nameJP";
pub const COL_NAME_TRANS: &str = "nameTrans";
pub const COL_NODE_LINK_ID: &str = "itemId";
pub const COL_SECTION_LINK_ID: &str = "sectionLinkId";
pub const COL_ITEM_TYPE: &str = "itemType";
pub const COL_OTHER_TYPE: &str = "itemSubtype";
pub const COL_BUTTON_TYPE: &str = "buttonType";
pub const COL_DATA_TYPE: &str = "dataType";
pub const COL_REQUIRED: &str = "required";
pub const COL_FORMAT: &str = "format";
pub const COL_MIN_LENGTH: &str = "minLength";
pub const COL_MAX_LENGTH: &str = "maxLength";
pub const COL_DEFAULT_VALUE: &str = "defaultValue";
pub const COL_VALIDATION_NOTE: &str = "validationNote";
pub const COL_ACTION: &str = "userAction";
pub const COL_LINKED_FRAME_ID: &str = "linkedFrameId";
pub const COL_NAVIGATION_NOTE: &str = "transitionNote";
pub const COL_TABLE_NAME: &str = "databaseTable";
pub const COL_COLUMN_NAME: &str = "databaseColumn";
pub const COL_DATABASE_NOTE: &str = "databaseNote";
pub const COL_DESCRIPTION: &str = "description";

/// Errors from sheet parsing. Both variants are fatal for the file.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("line {0}: CSV error: {1}")]
    Csv(usize, String),

    #[error("sheet is empty or has no data rows")]
    Empty,
}

/// Parse a whole sheet into spec records.
///
/// Lexical CSV failure aborts the file; individual cells never do. Rows
/// keep their sheet order.
pub fn parse_specs(reader: impl Read) -> Result<Vec<Spec>, SheetError> {
    let mut sheet = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = sheet
        .headers()
        .map_err(|e| SheetError::Csv(1, e.to_string()))?
        .clone();
    let columns = column_index(&headers);

    let mut specs = Vec::new();
    for (row_no, row) in sheet.records().enumerate() {
        // +2: rows are 1-indexed and the header occupies line 1.
        let row = row.map_err(|e| SheetError::Csv(row_no + 2, e.to_string()))?;
        specs.push(parse_row(&row, &columns));
    }

    if specs.is_empty() {
        return Err(SheetError::Empty);
    }
    Ok(specs)
}

fn column_index(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect()
}

fn parse_row(row: &StringRecord, columns: &HashMap<String, usize>) -> Spec {
    Spec {
        no: cell(row, columns, COL_NO),
        item_name: cell(row, columns, COL_ITEM_NAME),
        name: cell(row, columns, COL_NAME),
        name_translation: cell(row, columns, COL_NAME_TRANS),
        node_link_id: cell(row, columns, COL_NODE_LINK_ID),
        section_link_id: cell(row, columns, COL_SECTION_LINK_ID),
        item_type: cell(row, columns, COL_ITEM_TYPE),
        other_type: cell(row, columns, COL_OTHER_TYPE),
        button_type: cell(row, columns, COL_BUTTON_TYPE),
        data_type: cell(row, columns, COL_DATA_TYPE),
        required: cell_bool(row, columns, COL_REQUIRED),
        format: cell(row, columns, COL_FORMAT),
        min_length: cell_int(row, columns, COL_MIN_LENGTH),
        max_length: cell_int(row, columns, COL_MAX_LENGTH),
        default_value: cell(row, columns, COL_DEFAULT_VALUE),
        validation_note: cell(row, columns, COL_VALIDATION_NOTE),
        action: cell(row, columns, COL_ACTION),
        linked_frame_id: cell(row, columns, COL_LINKED_FRAME_ID),
        navigation_note: cell(row, columns, COL_NAVIGATION_NOTE),
        table_name: cell(row, columns, COL_TABLE_NAME),
        column_name: cell(row, columns, COL_COLUMN_NAME),
        database_note: cell(row, columns, COL_DATABASE_NOTE),
        description: cell(row, columns, COL_DESCRIPTION),
    }
}

fn cell(row: &StringRecord, columns: &HashMap<String, usize>, name: &str) -> Option<String> {
    let idx = *columns.get(name)?;
    let value = row.get(idx)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// Unparseable numeric/boolean cells are treated as not-provided rather
// than rejected; the breadcrumb keeps typos diagnosable.
fn cell_int(row: &StringRecord, columns: &HashMap<String, usize>, name: &str) -> Option<i64> {
    let value = cell(row, columns, name)?;
    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::debug!(column = name, value = %value, "ignoring unparseable numeric cell");
            None
        }
    }
}

fn cell_bool(row: &StringRecord, columns: &HashMap<String, usize>, name: &str) -> Option<bool> {
    let value = cell(row, columns, name)?;
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => {
            tracing::debug!(column = name, value = %value, "ignoring unparseable boolean cell");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_by_header_name_not_position() {
        let sheet = "\
itemType,itemId,nameJP,minLength,required
text_form,10:2,Login,1,yes
";
        let specs = parse_specs(sheet.as_bytes()).expect("sheet should parse");
        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert_eq!(spec.node_link_id.as_deref(), Some("10:2"));
        assert_eq!(spec.name.as_deref(), Some("Login"));
        assert_eq!(spec.item_type.as_deref(), Some("text_form"));
        assert_eq!(spec.min_length, Some(1));
        assert_eq!(spec.required, Some(true));
        assert!(spec.description.is_none());
    }

    #[test]
    fn blank_and_missing_cells_are_absent() {
        let sheet = "\
itemId,nameJP,description
10:2,  ,
";
        let specs = parse_specs(sheet.as_bytes()).expect("sheet should parse");
        assert!(specs[0].name.is_none());
        assert!(specs[0].description.is_none());
    }

    #[test]
    fn unparseable_numeric_and_boolean_cells_become_absent() {
        let sheet = "\
itemId,minLength,maxLength,required
10:2,abc,12,maybe
";
        let specs = parse_specs(sheet.as_bytes()).expect("sheet should parse");
        assert_eq!(specs[0].min_length, None);
        assert_eq!(specs[0].max_length, Some(12));
        assert_eq!(specs[0].required, None);
    }

    #[test]
    fn negative_lengths_survive_parsing() {
        // Rejecting them is the validator's job, not the parser's.
        let sheet = "\
itemId,minLength
10:2,-5
";
        let specs = parse_specs(sheet.as_bytes()).expect("sheet should parse");
        assert_eq!(specs[0].min_length, Some(-5));
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let sheet = "itemId,nameJP\n";
        match parse_specs(sheet.as_bytes()) {
            Err(SheetError::Empty) => {}
            other => panic!("expected empty-sheet error, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_are_tolerated() {
        let sheet = "\
itemId,nameJP,description
10:2,Login
10:3,Logout,signs the user out
";
        let specs = parse_specs(sheet.as_bytes()).expect("sheet should parse");
        assert_eq!(specs.len(), 2);
        assert!(specs[0].description.is_none());
        assert_eq!(specs[1].description.as_deref(), Some("signs the user out"));
    }

    #[test]
    fn bool_cells_accept_the_documented_spellings() {
        let sheet = "\
itemId,required
a,true
b,YES
c,0
d,No
";
        let specs = parse_specs(sheet.as_bytes()).expect("sheet should parse");
        let values: Vec<Option<bool>> = specs.iter().map(|s| s.required).collect();
        assert_eq!(
            values,
            vec![Some(true), Some(true), Some(false), Some(false)]
        );
    }
}
