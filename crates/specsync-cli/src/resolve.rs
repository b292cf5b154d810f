//! Input-file resolution for `upload` and `check`.
//!
//! Directory scans keep only sheets that match the path convention;
//! explicitly named files are validated individually so the user hears
//! why one was skipped.

use crate::path::{SHEET_ROOT, SheetPath, parse_sheet_path};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("failed to scan {0}: {1}")]
    Scan(String, String),
}

/// A file dropped before upload, with the reason shown to the user.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Collect candidate sheet paths from arguments, `--dir`, or the default
/// `.specsync/specs/` tree. Duplicates collapse; file order is stable.
pub fn resolve_files(
    args: &[String],
    dir: Option<&str>,
    recursive: bool,
) -> Result<Vec<PathBuf>, ResolveError> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut seen: BTreeSet<PathBuf> = BTreeSet::new();

    for arg in args {
        let path = PathBuf::from(arg);
        if path.is_dir() {
            scan_directory(&path, recursive, &mut files, &mut seen)?;
        } else {
            push_unique(path, &mut files, &mut seen);
        }
    }

    if let Some(dir) = dir {
        scan_directory(Path::new(dir), recursive, &mut files, &mut seen)?;
    }

    if args.is_empty() && dir.is_none() {
        let fallback = Path::new(SHEET_ROOT).join("specs");
        if fallback.is_dir() {
            scan_directory(&fallback, true, &mut files, &mut seen)?;
        }
    }

    Ok(files)
}

fn scan_directory(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
    seen: &mut BTreeSet<PathBuf>,
) -> Result<(), ResolveError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ResolveError::Scan(dir.display().to_string(), e.to_string()))?;
    // Deterministic scan order regardless of the filesystem.
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            if recursive {
                scan_directory(&path, recursive, files, seen)?;
            }
            continue;
        }
        if !is_csv(&path) || parse_sheet_path(&path).is_err() {
            continue;
        }
        push_unique(path, files, seen);
    }
    Ok(())
}

fn push_unique(path: PathBuf, files: &mut Vec<PathBuf>, seen: &mut BTreeSet<PathBuf>) {
    let canonical = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
    if seen.insert(canonical) {
        files.push(path);
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Split resolved paths into uploadable sheets and skipped files.
pub fn validate_files(files: Vec<PathBuf>) -> (Vec<(PathBuf, SheetPath)>, Vec<SkippedFile>) {
    let mut valid = Vec::new();
    let mut skipped = Vec::new();

    for path in files {
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(_) => {
                skipped.push(SkippedFile {
                    path,
                    reason: "file not found".to_string(),
                });
                continue;
            }
        };
        if metadata.is_dir() {
            skipped.push(SkippedFile {
                path,
                reason: "path is a directory, not a file".to_string(),
            });
            continue;
        }
        if !is_csv(&path) {
            skipped.push(SkippedFile {
                path,
                reason: "not a CSV file".to_string(),
            });
            continue;
        }
        let parsed = match parse_sheet_path(&path) {
            Ok(parsed) => parsed,
            Err(e) => {
                skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if metadata.len() == 0 {
            skipped.push(SkippedFile {
                path,
                reason: "file is empty".to_string(),
            });
            continue;
        }
        valid.push((path, parsed));
    }

    (valid, skipped)
}
