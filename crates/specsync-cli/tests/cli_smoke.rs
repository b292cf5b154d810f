use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "specsync-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_specsync<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_specsync");
    Command::new(bin)
        .args(args)
        .output()
        .expect("specsync command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_sheet(root: &Path, name: &str, contents: &str) -> PathBuf {
    let dir = root.join(".specsync/specs/i09vM3jClQiu8cwXsMo6uy");
    fs::create_dir_all(&dir).expect("sheet dir should be created");
    let path = dir.join(name);
    fs::write(&path, contents).expect("sheet should be written");
    path
}

const CLEAN_SHEET: &str = "\
itemId,itemName,nameJP,itemType,dataType,required,minLength,maxLength
10:1,Login,ログイン,text_form,string,yes,1,64
10:2,Note,注記,label,,,,
";

const BROKEN_SHEET: &str = "\
itemId,nameJP,userAction
10:1,Login,on_hover
";

#[test]
fn check_reports_clean_sheet_as_json() {
    let tmp = TempDirGuard::new("check-clean");
    let sheet = write_sheet(tmp.path(), "9276:19907-TOP_Channel.csv", CLEAN_SHEET);

    let output = run_specsync(["check", "--json", &sheet.display().to_string()]);
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["action"], "check");
    assert_eq!(payload["summary"]["sheets"], 1);
    assert_eq!(payload["summary"]["rows"], 2);
    assert_eq!(payload["summary"]["violations"], 0);

    let rows = payload["files"][0]["rows"]
        .as_array()
        .expect("rows should be an array");
    assert_eq!(rows[0]["status"], "completed");
    assert_eq!(rows[0]["nodeLinkId"], "10:1");
    assert_eq!(rows[1]["status"], "completed");
    assert_eq!(payload["files"][0]["frameId"], "9276:19907");
}

#[test]
fn check_flags_violations_and_exits_nonzero() {
    let tmp = TempDirGuard::new("check-broken");
    let sheet = write_sheet(tmp.path(), "1:2-Top.csv", BROKEN_SHEET);

    let output = run_specsync(["check", "--json", &sheet.display().to_string()]);
    assert_failure(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["summary"]["violations"], 1);
    let rows = payload["files"][0]["rows"]
        .as_array()
        .expect("rows should be an array");
    assert_eq!(rows[0]["status"], "draft");
    let violations = rows[0]["violations"]
        .as_array()
        .expect("violations should be an array");
    assert!(
        violations[0]
            .as_str()
            .expect("violation should be a string")
            .starts_with("action must be one of:")
    );
}

#[test]
fn check_human_output_names_the_offending_line() {
    let tmp = TempDirGuard::new("check-human");
    let sheet = write_sheet(tmp.path(), "1:2-Top.csv", BROKEN_SHEET);

    let output = run_specsync(["check", &sheet.display().to_string()]);
    assert_failure(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("line 2 (10:1): action must be one of:"));
    assert!(stdout.contains("1 violation"));
}

#[test]
fn dry_run_upload_reports_without_network() {
    let tmp = TempDirGuard::new("dry-run");
    let sheet = write_sheet(tmp.path(), "1:2-Top.csv", CLEAN_SHEET);

    let output = run_specsync([
        "upload",
        "--dry-run",
        "--json",
        &sheet.display().to_string(),
    ]);
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["action"], "upload");
    assert_eq!(payload["dryRun"], true);
    assert_eq!(payload["files"][0]["rowCount"], 2);
    assert_eq!(payload["files"][0]["fileKey"], "i09vM3jClQiu8cwXsMo6uy");
}

#[test]
fn off_convention_files_are_skipped_with_reasons() {
    let tmp = TempDirGuard::new("skip");
    let stray = tmp.path().join("notes.csv");
    fs::write(&stray, "itemId\n10:1\n").expect("stray file should write");

    let output = run_specsync([
        "upload",
        "--dry-run",
        "--json",
        &stray.display().to_string(),
    ]);
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["files"][0]["status"], "skipped");
    assert!(
        payload["files"][0]["reason"]
            .as_str()
            .expect("reason should be a string")
            .contains("does not match")
    );
}

#[test]
fn no_input_prints_the_convention_hint() {
    let tmp = TempDirGuard::new("empty");
    let output = Command::new(env!("CARGO_BIN_EXE_specsync"))
        .args(["upload"])
        .current_dir(tmp.path())
        .output()
        .expect("specsync command should execute");
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No sheets found"));
    assert!(stdout.contains(".specsync/specs/"));
}
