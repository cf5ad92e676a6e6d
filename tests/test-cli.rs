use std::fs;
use std::path::PathBuf;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_docstamp");

/// Creates a throwaway checkout with one commit. Returns None when git
/// itself is unavailable, in which case the caller skips.
fn scratch_repo(name: &str) -> Option<PathBuf> {
    let dir = std::env::temp_dir().join(format!("docstamp_repo_{}_{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).ok()?;

    let git = |args: &[&str]| {
        Command::new("git")
            .args(args)
            .current_dir(&dir)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    };

    if !git(&["init", "-q"]) {
        return None;
    }
    if !git(&[
        "-c",
        "user.email=docstamp@example.com",
        "-c",
        "user.name=docstamp",
        "commit",
        "-q",
        "--allow-empty",
        "-m",
        "init",
    ]) {
        return None;
    }
    Some(dir)
}

#[test]
fn test_cli_help() {
    let output = Command::new(BIN)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--token"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(BIN)
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("docstamp"));
}

#[test]
fn test_check_fails_when_the_placeholder_is_absent() {
    let Some(dir) = scratch_repo("check") else { return };
    let doc = dir.join("doc.md");
    fs::write(&doc, "Date: {{DATE}}\n").unwrap();

    let output = Command::new(BIN)
        .arg(&doc)
        .arg("--check")
        .current_dir(&dir)
        .output()
        .expect("Failed to execute command");

    let content = fs::read_to_string(&doc).unwrap();
    let _ = fs::remove_dir_all(&dir);

    // Companion tokens stay inert and must not satisfy --check.
    assert!(!output.status.success());
    assert_eq!(content, "Date: {{DATE}}\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("{{HASH}}"));
}

#[test]
fn test_json_summary_carries_revision_files_and_stats() {
    let Some(dir) = scratch_repo("json") else { return };
    let doc = dir.join("doc.md");
    fs::write(&doc, "Build: {{HASH}}\n").unwrap();

    let output = Command::new(BIN)
        .arg(&doc)
        .arg("--json")
        .arg("--quiet")
        .current_dir(&dir)
        .output()
        .expect("Failed to execute command");

    let _ = fs::remove_dir_all(&dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert!(summary["revision"].is_string());
    assert_eq!(summary["files"].as_array().unwrap().len(), 1);
    assert_eq!(summary["files"][0]["replaced"], 1);
    assert_eq!(summary["stats"]["files"], 1);
    assert_eq!(summary["stats"]["replaced"], 1);
}

#[test]
fn test_failed_resolution_exits_nonzero_and_preserves_file() {
    let path = std::env::temp_dir().join(format!("docstamp_cli_{}.md", std::process::id()));
    fs::write(&path, "Build: {{HASH}}\n").unwrap();

    // GIT_DIR pointing nowhere makes rev-parse fail even inside a checkout.
    let output = Command::new(BIN)
        .arg(&path)
        .env("GIT_DIR", "/nonexistent/docstamp-git-dir")
        .output()
        .expect("Failed to execute command");

    let content = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    assert_eq!(content, "Build: {{HASH}}\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rev-parse"));
}
