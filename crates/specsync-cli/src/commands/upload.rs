//! `specsync upload`: reconcile sheets against the design store.

use crate::config::Config;
use crate::path::SheetPath;
use crate::resolve::{SkippedFile, resolve_files, validate_files};
use chrono::Utc;
use serde_json::{Value, json};
use specsync_model::parse_specs;
use specsync_pipeline::{FileOutcome, FileReport, RowDisposition, reconcile_file};
use specsync_remote::{DesignStore, GraphQlStore};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Args {
    pub files: Vec<String>,
    pub dir: Option<String>,
    pub recursive: bool,
    pub dry_run: bool,
    pub continue_on_error: bool,
    pub json: bool,
}

struct FileResult {
    path: PathBuf,
    sheet: SheetPath,
    report: FileReport,
}

pub fn run(args: Args) {
    let resolved = resolve_files(&args.files, args.dir.as_deref(), args.recursive)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        });
    let (sheets, skipped) = validate_files(resolved);

    if sheets.is_empty() && skipped.is_empty() {
        if args.json {
            print_json(&json!({
                "action": "upload",
                "files": [],
                "summary": {"total": 0, "success": 0, "failed": 0, "skipped": 0}
            }));
        } else {
            println!("No sheets found to upload");
            println!("\nSheets must follow the path convention:");
            println!("  .specsync/specs/{{file_key}}/{{frame_id}}-{{frame_name}}.csv");
        }
        return;
    }

    if args.dry_run {
        run_dry(&sheets, &skipped, args.json);
        return;
    }

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let store = GraphQlStore::new(config.endpoint.clone(), config.token.clone()).unwrap_or_else(|e| {
        eprintln!("error: failed to build design-store client: {e}");
        std::process::exit(1);
    });

    if !args.json {
        println!("specsync upload");
        print_skipped(&skipped);
        println!("  Uploading {} sheet(s)...", sheets.len());
    }

    // Cancellation is observed between files only; nothing installs the
    // flag yet, but the batch loop is written against it.
    let cancel = AtomicBool::new(false);
    let results = upload_batch(
        &store,
        &sheets,
        config.actor.as_deref(),
        args.continue_on_error,
        &cancel,
        !args.json,
    );

    let success = count(&results, "success");
    let failed = count(&results, "failed");
    let skipped_count =
        skipped.len() + count(&results, "skipped") + sheets.len().saturating_sub(results.len());
    let total = sheets.len() + skipped.len();

    if args.json {
        let mut files: Vec<Value> = skipped.iter().map(skipped_json).collect();
        files.extend(results.iter().map(result_json));
        print_json(&json!({
            "action": "upload",
            "endpoint": config.endpoint,
            "dryRun": false,
            "completedAt": Utc::now().to_rfc3339(),
            "summary": {
                "total": total,
                "success": success,
                "failed": failed,
                "skipped": skipped_count
            },
            "files": files,
        }));
    } else {
        println!(
            "  Summary: {total} total, {success} success, {failed} failed, {skipped_count} skipped"
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Upload sheets one at a time, in input order.
///
/// A failed file stops the batch unless `continue_on_error` is set; a
/// raised cancel flag stops it at the next file boundary, returning the
/// results accumulated so far.
fn upload_batch(
    store: &dyn DesignStore,
    sheets: &[(PathBuf, SheetPath)],
    actor: Option<&str>,
    continue_on_error: bool,
    cancel: &AtomicBool,
    verbose: bool,
) -> Vec<FileResult> {
    let mut results = Vec::new();

    for (index, (path, sheet)) in sheets.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            tracing::warn!("upload cancelled; remaining files untouched");
            break;
        }

        if verbose {
            print!("  [{}/{}] {} ", index + 1, sheets.len(), file_name(path));
        }

        let report = match File::open(path) {
            Ok(file) => reconcile_file(store, &sheet.file_key, &sheet.frame_id, file, actor),
            Err(e) => FileReport::failed(format!("failed to open sheet: {e}")),
        };

        if verbose {
            print_report_line(&report);
        }

        let failed = matches!(report.outcome, FileOutcome::Failed { .. });
        results.push(FileResult {
            path: path.clone(),
            sheet: sheet.clone(),
            report,
        });
        if failed && !continue_on_error {
            break;
        }
    }

    results
}

fn run_dry(sheets: &[(PathBuf, SheetPath)], skipped: &[SkippedFile], json_output: bool) {
    let mut files: Vec<Value> = skipped.iter().map(skipped_json).collect();

    if !json_output {
        println!("specsync upload (dry run)");
        print_skipped(skipped);
        println!("  Would upload {} sheet(s):", sheets.len());
    }

    for (path, sheet) in sheets {
        let rows = File::open(path)
            .map_err(|e| e.to_string())
            .and_then(|file| parse_specs(file).map_err(|e| e.to_string()));

        match rows {
            Ok(specs) => {
                if json_output {
                    files.push(json!({
                        "file": file_name(path),
                        "fileKey": sheet.file_key,
                        "frameId": sheet.frame_id,
                        "frameName": sheet.frame_name,
                        "rowCount": specs.len(),
                    }));
                } else {
                    println!("    - {}", file_name(path));
                    println!("      File key: {}", sheet.file_key);
                    println!("      Frame: {} ({})", sheet.frame_id, sheet.frame_name);
                    println!("      Rows: {}", specs.len());
                }
            }
            Err(reason) => {
                if json_output {
                    files.push(json!({
                        "file": file_name(path),
                        "status": "failed",
                        "reason": reason,
                    }));
                } else {
                    println!("    - {} (unreadable: {reason})", file_name(path));
                }
            }
        }
    }

    if json_output {
        print_json(&json!({
            "action": "upload",
            "dryRun": true,
            "files": files,
        }));
    }
}

fn print_report_line(report: &FileReport) {
    match &report.outcome {
        FileOutcome::Success { written, invalid } => {
            println!(".... done ({written} written, {invalid} invalid)");
        }
        FileOutcome::Failed { reason } => {
            println!(".... failed");
            println!("    reason: {reason}");
        }
        FileOutcome::Skipped { reason } => {
            println!(".... skipped");
            println!("    reason: {reason}");
        }
    }

    for row in &report.rows {
        if row.disposition == RowDisposition::Invalid {
            let key = row.node_link_id.as_deref().unwrap_or("<no itemId>");
            for violation in &row.violations {
                println!("    line {} ({key}): {violation}", row.line);
            }
        }
    }
}

fn print_skipped(skipped: &[SkippedFile]) {
    for skip in skipped {
        println!("  [SKIPPED] {}", file_name(&skip.path));
        println!("    reason: {}", skip.reason);
    }
}

fn count(results: &[FileResult], status: &str) -> usize {
    results
        .iter()
        .filter(|r| r.report.outcome.as_str() == status)
        .count()
}

fn result_json(result: &FileResult) -> Value {
    let (written, invalid, reason) = match &result.report.outcome {
        FileOutcome::Success { written, invalid } => (Some(*written), Some(*invalid), None),
        FileOutcome::Failed { reason } | FileOutcome::Skipped { reason } => {
            (None, None, Some(reason.clone()))
        }
    };

    let rows: Vec<Value> = result
        .report
        .rows
        .iter()
        .map(|row| {
            json!({
                "line": row.line,
                "nodeLinkId": row.node_link_id,
                "status": row.status.as_str(),
                "disposition": row.disposition.as_str(),
                "violations": row.violations,
            })
        })
        .collect();

    json!({
        "file": file_name(&result.path),
        "fileKey": result.sheet.file_key,
        "frameId": result.sheet.frame_id,
        "status": result.report.outcome.as_str(),
        "written": written,
        "invalid": invalid,
        "reason": reason,
        "rows": rows,
    })
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
