//! `specsync check`: offline status determination and rule violations.
//!
//! Parses each sheet and reports per-row status without contacting the
//! design store, so change detection and linked-frame integrity are out
//! of scope here.

use crate::resolve::{SkippedFile, resolve_files, validate_files};
use serde_json::{Value, json};
use specsync_model::parse_specs;
use specsync_validate::determine_status;
use std::fs::File;
use std::path::Path;

pub fn run(files: Vec<String>, dir: Option<String>, recursive: bool, json_output: bool) {
    let resolved = resolve_files(&files, dir.as_deref(), recursive).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let (sheets, skipped) = validate_files(resolved);

    if sheets.is_empty() {
        if json_output {
            let files: Vec<Value> = skipped.iter().map(skipped_json).collect();
            print_json(&json!({
                "action": "check",
                "files": files,
                "summary": {"sheets": 0, "rows": 0, "violations": 0}
            }));
        } else {
            println!("No sheets found to check");
            for skip in &skipped {
                println!("  [SKIPPED] {}: {}", file_name(&skip.path), skip.reason);
            }
        }
        return;
    }

    let mut files_json: Vec<Value> = skipped.iter().map(skipped_json).collect();
    let mut total_rows = 0usize;
    let mut total_violations = 0usize;
    let mut unreadable = 0usize;

    if !json_output {
        println!("specsync check");
        for skip in &skipped {
            println!("  [SKIPPED] {}: {}", file_name(&skip.path), skip.reason);
        }
    }

    for (path, sheet) in &sheets {
        let specs = match File::open(path)
            .map_err(|e| e.to_string())
            .and_then(|file| parse_specs(file).map_err(|e| e.to_string()))
        {
            Ok(specs) => specs,
            Err(reason) => {
                unreadable += 1;
                if json_output {
                    files_json.push(json!({
                        "file": file_name(path),
                        "fileKey": sheet.file_key,
                        "frameId": sheet.frame_id,
                        "status": "failed",
                        "reason": reason,
                    }));
                } else {
                    println!("  {}: unreadable ({reason})", file_name(path));
                }
                continue;
            }
        };

        let mut rows: Vec<Value> = Vec::new();
        let mut violation_rows = 0usize;
        for (idx, spec) in specs.iter().enumerate() {
            let line = idx + 2;
            let (status, violations) = determine_status(spec);
            if !violations.is_empty() {
                violation_rows += 1;
                total_violations += violations.len();
            }

            if json_output {
                rows.push(json!({
                    "line": line,
                    "nodeLinkId": spec.node_link_id,
                    "status": status.as_str(),
                    "violations": violations,
                }));
            } else if !violations.is_empty() {
                let key = spec.node_link_id.as_deref().unwrap_or("<no itemId>");
                for violation in &violations {
                    println!("    line {line} ({key}): {violation}");
                }
            }
        }

        total_rows += specs.len();
        if json_output {
            files_json.push(json!({
                "file": file_name(path),
                "fileKey": sheet.file_key,
                "frameId": sheet.frame_id,
                "status": "checked",
                "rows": rows,
            }));
        } else {
            println!(
                "  {}: {} rows, {} with violations",
                file_name(path),
                specs.len(),
                violation_rows
            );
        }
    }

    if json_output {
        print_json(&json!({
            "action": "check",
            "files": files_json,
            "summary": {
                "sheets": sheets.len(),
                "rows": total_rows,
                "violations": total_violations,
            }
        }));
    } else {
        println!(
            "  Summary: {} sheet(s), {} row(s), {} violation(s)",
            sheets.len(),
            total_rows,
            total_violations
        );
    }

    if total_violations > 0 || unreadable > 0 {
        std::process::exit(1);
    }
}

fn skipped_json(skip: &SkippedFile) -> Value {
    json!({
        "file": file_name(&skip.path),
        "status": "skipped",
        "reason": skip.reason,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_json(payload: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}
