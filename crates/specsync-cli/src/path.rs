//! Sheet path convention.
//!
//! Sheets live at `.specsync/specs/{file_key}/{frame_id}-{frame_name}.csv`.
//! Frame ids may contain colons (`9276:19907-TOP_Channel.csv`), so the id
//! ends at the first dash.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub const SHEET_ROOT: &str = ".specsync";

/// Key parts extracted from a sheet path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPath {
    pub file_key: String,
    pub frame_id: String,
    pub frame_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error(
        "path does not match .specsync/specs/{{file_key}}/{{frame_id}}-{{frame_name}}.csv"
    )]
    Pattern,

    #[error("file_key, frame_id and frame_name must not be empty")]
    EmptySegment,
}

fn sheet_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\.specsync/specs/([^/]+)/([^-]+)-([^.]+)\.csv$")
            .expect("sheet path regex must compile")
    })
}

/// Extract the file key, frame id and frame name from a sheet path.
pub fn parse_sheet_path(path: &Path) -> Result<SheetPath, PathError> {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let captures = sheet_path_re()
        .captures(&normalized)
        .ok_or(PathError::Pattern)?;

    let file_key = captures[1].trim().to_string();
    let frame_id = captures[2].trim().to_string();
    let frame_name = captures[3].trim().to_string();
    if file_key.is_empty() || frame_id.is_empty() || frame_name.is_empty() {
        return Err(PathError::EmptySegment);
    }

    Ok(SheetPath {
        file_key,
        frame_id,
        frame_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extracts_parts_including_colon_frame_ids() {
        let path =
            PathBuf::from(".specsync/specs/i09vM3jClQiu8cwXsMo6uy/9276:19907-TOP_Channel.csv");
        let parsed = parse_sheet_path(&path).expect("path should parse");
        assert_eq!(parsed.file_key, "i09vM3jClQiu8cwXsMo6uy");
        assert_eq!(parsed.frame_id, "9276:19907");
        assert_eq!(parsed.frame_name, "TOP_Channel");
    }

    #[test]
    fn accepts_absolute_paths_and_backslashes() {
        let path = PathBuf::from("/work/project/.specsync/specs/key/1:2-Top.csv");
        assert!(parse_sheet_path(&path).is_ok());

        let windows = PathBuf::from(r"C:\work\.specsync\specs\key\1:2-Top.csv");
        assert!(parse_sheet_path(&windows).is_ok());
    }

    #[test]
    fn rejects_paths_off_the_convention() {
        for bad in [
            "specs/key/1:2-Top.csv",
            ".specsync/specs/key/1:2-Top.txt",
            ".specsync/specs/1:2-Top.csv",
            ".specsync/testdata/key/1:2-Top.csv",
        ] {
            assert!(
                parse_sheet_path(&PathBuf::from(bad)).is_err(),
                "expected rejection for {bad}"
            );
        }
    }
}
