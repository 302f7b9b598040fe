use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const COMMIT_F1_SCRIPT: &str =
    "enter,type:Test,enter,down,enter,type:Desc,enter,down,right,right,enter,down,down,enter";

fn write_catalog(home: &Path) -> String {
    let catalog = home.join("catalog.yaml");
    fs::write(
        &catalog,
        "filters: [F1, F2]\nagents:\n  - id: 10.0.0.1\n    name: edge\n",
    )
    .expect("write catalog");
    catalog.display().to_string()
}

fn run_flowfilter(home: &Path, script: &str, outbox: &Path) -> Output {
    let catalog = write_catalog(home);
    Command::new(env!("CARGO_BIN_EXE_flowfilter"))
        .args(["run", "--catalog", &catalog, "--outbox"])
        .arg(outbox)
        .env("HOME", home)
        .env("FLOWFILTER_SCRIPT_KEYS", script)
        .output()
        .expect("run binary")
}

#[test]
fn binary_commits_filter_to_outbox_and_logs_session() {
    let dir = tempdir().expect("tempdir");
    let home = dir.path();
    let outbox = home.join("outbox");

    let output = run_flowfilter(home, COMMIT_F1_SCRIPT, &outbox);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "filter `Test` updated"
    );

    let messages: Vec<_> = fs::read_dir(&outbox)
        .expect("read outbox")
        .map(|entry| entry.expect("entry").path())
        .collect();
    assert_eq!(messages.len(), 1);
    let body: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&messages[0]).expect("read message"))
            .expect("decode message");
    assert_eq!(
        body,
        serde_json::json!({
            "Command": "FilterExpressionUpdateMessage",
            "Name": "Test",
            "Description": "Desc",
            "Query": "F1 ",
        })
    );

    let log = fs::read_to_string(home.join(".flowfilter/logs/wizard.log")).expect("read log");
    assert!(log.contains("\"event\":\"filter.pushed\""));
    assert!(log.contains("\"event\":\"session.finished\""));
}

#[test]
fn binary_reports_detach_and_exits_cleanly() {
    let dir = tempdir().expect("tempdir");
    let outbox = dir.path().join("outbox");

    let output = run_flowfilter(dir.path(), "down,ctrl-c", &outbox);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "User detached");
    assert!(!outbox.exists());
}

#[test]
fn binary_reports_commit_failure_with_exit_status() {
    let dir = tempdir().expect("tempdir");
    let blocked = dir.path().join("outbox");
    fs::write(&blocked, "not a directory").expect("write blocker");

    let output = run_flowfilter(dir.path(), COMMIT_F1_SCRIPT, &blocked);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Adding filter failed: "));
}

#[test]
fn binary_requires_catalog_when_no_config_exists() {
    let dir = tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_flowfilter"))
        .arg("run")
        .env("HOME", dir.path())
        .env("FLOWFILTER_SCRIPT_KEYS", "esc")
        .output()
        .expect("run binary");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("catalog_path"));
}
