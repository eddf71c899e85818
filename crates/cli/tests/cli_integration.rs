use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const DEFINITIONS: &str = r#"{
  "schemaVersion": 1,
  "options": { "defaultType": "string" },
  "args": [
    { "cliKeys": ["--database-url"], "jsonKey": "databaseUrl", "required": true },
    { "cliKeys": ["--port", "-p"], "jsonKey": "port", "type": "number" },
    { "cliKeys": ["--verbose", "-v"], "jsonKey": "verbose", "type": "boolean" },
    { "cliKeys": ["--environment", "-e"], "jsonKey": "environment" }
  ]
}"#;

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("argfold-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn write_definitions(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("argfold.json");
    fs::write(&path, contents).expect("failed to write definitions");
    path
}

fn argfold() -> Command {
    Command::new(env!("CARGO_BIN_EXE_argfold"))
}

fn assert_success(out: &Output, what: &str) {
    assert!(
        out.status.success(),
        "{what} failed:\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    );
}

#[test]
fn help_works() {
    let out = argfold()
        .arg("--help")
        .output()
        .expect("failed to run argfold --help");
    assert_success(&out, "argfold --help");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("argfold") && stdout.contains("parse") && stdout.contains("check"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn parse_prints_typed_json() {
    let dir = make_temp_dir("parse-json");
    let defs = write_definitions(&dir, DEFINITIONS);

    let out = argfold()
        .arg("parse")
        .arg("--manifest")
        .arg(&defs)
        .arg("--")
        .args([
            "--database-url=postgresql://localhost:5432/test",
            "-p",
            "3000",
            "-v",
            "-e",
            "production",
        ])
        .output()
        .expect("failed to run argfold parse");
    assert_success(&out, "argfold parse");

    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is not JSON");
    assert_eq!(
        value,
        serde_json::json!({
            "databaseUrl": "postgresql://localhost:5432/test",
            "port": 3000,
            "verbose": true,
            "environment": "production",
        })
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn parse_uses_default_definition_file_in_cwd() {
    let dir = make_temp_dir("parse-cwd");
    write_definitions(&dir, DEFINITIONS);

    let out = argfold()
        .current_dir(&dir)
        .args(["parse", "--", "--database-url", "u"])
        .output()
        .expect("failed to run argfold parse");
    assert_success(&out, "argfold parse");
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is not JSON");
    assert_eq!(value, serde_json::json!({ "databaseUrl": "u" }));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn parse_failure_reports_kind_and_key() {
    let dir = make_temp_dir("parse-missing");
    let defs = write_definitions(&dir, DEFINITIONS);

    let out = argfold()
        .arg("parse")
        .arg("-m")
        .arg(&defs)
        .args(["--", "--port", "3000"])
        .output()
        .expect("failed to run argfold parse");
    assert!(!out.status.success(), "expected failure");
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("missing-required-argument") && stderr.contains("--database-url"),
        "unexpected stderr:\n{stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn command_line_overrides_file_options() {
    let dir = make_temp_dir("parse-overrides");
    let defs = write_definitions(&dir, DEFINITIONS);
    let tokens = ["--database-url", "u", "--unknown", "x"];

    let lenient = argfold()
        .arg("parse")
        .arg("-m")
        .arg(&defs)
        .arg("--")
        .args(tokens)
        .output()
        .expect("failed to run argfold parse");
    assert_success(&lenient, "argfold parse");

    let strict = argfold()
        .arg("parse")
        .arg("-m")
        .arg(&defs)
        .args(["--ignore-unknown-args", "false", "--"])
        .args(tokens)
        .output()
        .expect("failed to run argfold parse");
    assert!(!strict.status.success(), "expected failure");
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(
        stderr.contains("unknown-argument") && stderr.contains("--unknown"),
        "unexpected stderr:\n{stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_lists_definitions() {
    let dir = make_temp_dir("check-list");
    let defs = write_definitions(&dir, DEFINITIONS);

    let out = argfold()
        .arg("check")
        .arg("-m")
        .arg(&defs)
        .output()
        .expect("failed to run argfold check");
    assert_success(&out, "argfold check");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--port, -p  ->  port (number)"), "{stdout}");
    assert!(
        stdout.contains("--database-url  ->  databaseUrl (string, required)"),
        "{stdout}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_rejects_reused_cli_key() {
    let dir = make_temp_dir("check-conflict");
    let defs = write_definitions(
        &dir,
        r#"{ "args": [
            { "cliKeys": ["--host", "-h"], "jsonKey": "host" },
            { "cliKeys": ["-h"], "jsonKey": "help", "type": "boolean" }
        ] }"#,
    );

    let out = argfold()
        .arg("check")
        .arg("-m")
        .arg(&defs)
        .output()
        .expect("failed to run argfold check");
    assert!(!out.status.success(), "expected failure");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("invalid definition for 'help'") && stderr.contains("-h"),
        "unexpected stderr:\n{stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_json_reports_effective_options() {
    let dir = make_temp_dir("check-json");
    let defs = write_definitions(&dir, DEFINITIONS);

    let out = argfold()
        .arg("check")
        .arg("-m")
        .arg(&defs)
        .args(["--default-required", "true", "--json"])
        .output()
        .expect("failed to run argfold check");
    assert_success(&out, "argfold check --json");
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is not JSON");
    assert_eq!(value["options"]["defaultRequired"], serde_json::json!(true));
    assert_eq!(value["options"]["ignoreUnknownArgs"], serde_json::json!(true));
    assert_eq!(value["args"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["args"][1]["cliKeys"], serde_json::json!(["--port", "-p"]));

    let _ = fs::remove_dir_all(&dir);
}
