//! Integration tests for the oss and sftp binaries
//!
//! These tests need a reachable bucket and SSH server.
//!
//! Run with:
//! ```bash
//! export OSS_HOST=https://<bucket>.cos.<region>.myqcloud.com
//! export OSS_SECRET_ID=...
//! export OSS_SECRET_KEY=...
//! export TEST_SFTP_TARGET=user:password@host/tmp/opskit-it
//! cargo test --features integration
//! ```
//!
//! Tests whose environment is missing print a notice and pass.

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run a binary built from this package
fn run(binary: &str, args: &[&str]) -> Output {
    Command::new(binary)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn run_oss(args: &[&str]) -> Output {
    run(env!("CARGO_BIN_EXE_oss"), args)
}

fn run_sftp(args: &[&str]) -> Output {
    run(env!("CARGO_BIN_EXE_sftp"), args)
}

fn oss_configured() -> bool {
    ["OSS_HOST", "OSS_SECRET_ID", "OSS_SECRET_KEY"]
        .iter()
        .all(|name| std::env::var(name).is_ok_and(|v| !v.is_empty()))
}

fn sftp_target() -> Option<String> {
    std::env::var("TEST_SFTP_TARGET").ok().filter(|t| !t.is_empty())
}

/// Generate unique suffix for test resources
fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{:x}", duration.as_nanos() % 0xFFFFFFFF)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

mod cli_surface {
    use super::*;

    #[test]
    fn test_scale_needs_no_environment() {
        let output = run_oss(&["scale"]);
        assert!(output.status.success());
        let out = stdout(&output);
        assert_eq!(out.lines().count(), 6);
        assert!(out.lines().all(|l| l.starts_with("?imageMogr2/thumbnail/")));
    }

    #[test]
    fn test_unknown_command_fails() {
        let output = run_oss(&["frobnicate"]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_missing_flag_fails() {
        let output = run_oss(&["delete"]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_malformed_address_fails_without_leaking_password() {
        let output = run_sftp(&["push", "--src", ".", "--dst", "user:hunter2@host"]);
        assert_eq!(output.status.code(), Some(2));
        assert!(!stderr(&output).contains("hunter2"));
    }
}

mod object_operations {
    use super::*;

    #[test]
    fn test_push_list_pull_delete() {
        if !oss_configured() {
            eprintln!("Skipping: OSS_* environment not set");
            return;
        }

        let dir = TempDir::new().expect("Failed to create temp dir");
        let source = dir.path().join("upload.txt");
        std::fs::write(&source, "x".repeat(3000)).expect("Failed to write source");

        let prefix = format!("opskit-it-{}", unique_suffix());
        let key = format!("{prefix}/upload.txt");
        let source_str = source.to_string_lossy().into_owned();

        let output = run_oss(&["push", "--name", &key, "--path", &source_str]);
        assert!(output.status.success(), "push failed: {}", stderr(&output));
        assert!(stdout(&output).trim().ends_with(&format!("/{key}")));

        let output = run_oss(&["list", "--prefix", &prefix]);
        assert!(output.status.success(), "list failed: {}", stderr(&output));
        assert!(stdout(&output).contains(&format!("{key}, 2 KB")));

        let target = dir.path().join("download.txt");
        let target_str = target.to_string_lossy().into_owned();
        let output = run_oss(&["pull", "--name", &key, "--path", &target_str]);
        assert!(output.status.success(), "pull failed: {}", stderr(&output));
        assert_eq!(
            std::fs::read(&target).expect("Failed to read download"),
            std::fs::read(&source).expect("Failed to read source")
        );

        let output = run_oss(&["delete", "--name", &key]);
        assert!(output.status.success(), "delete failed: {}", stderr(&output));

        let output = run_oss(&["list", "--prefix", &prefix]);
        assert!(output.status.success());
        assert!(!stdout(&output).contains(&key));
    }

    #[test]
    fn test_pull_missing_object_fails() {
        if !oss_configured() {
            eprintln!("Skipping: OSS_* environment not set");
            return;
        }

        let dir = TempDir::new().expect("Failed to create temp dir");
        let target = dir.path().join("missing.txt");
        let key = format!("opskit-it-missing-{}", unique_suffix());
        let output = run_oss(&["pull", "--name", &key, "--path", &target.to_string_lossy()]);
        assert!(!output.status.success());
        assert!(!target.exists(), "no local file for a missing object");
    }
}

mod tree_transfer {
    use super::*;

    fn write_tree(root: &Path) {
        std::fs::create_dir_all(root.join("nested/deeper")).expect("Failed to create tree");
        std::fs::write(root.join("top.txt"), "top").expect("Failed to write file");
        std::fs::write(root.join("nested/mid.txt"), "mid").expect("Failed to write file");
        std::fs::write(root.join("nested/deeper/leaf.txt"), "leaf").expect("Failed to write file");
    }

    #[test]
    fn test_push_then_pull_directory() {
        let Some(base) = sftp_target() else {
            eprintln!("Skipping: TEST_SFTP_TARGET not set");
            return;
        };

        let dir = TempDir::new().expect("Failed to create temp dir");
        let source = dir.path().join("tree");
        write_tree(&source);

        let remote = format!("{}/{}", base.trim_end_matches('/'), unique_suffix());
        let output = run_sftp(&["push", "--src", &source.to_string_lossy(), "--dst", &remote]);
        assert!(output.status.success(), "push failed: {}", stderr(&output));
        assert!(stdout(&output).contains("copy directory finished!"));

        // Pushing again over the existing tree succeeds and overwrites.
        let output = run_sftp(&["push", "--src", &source.to_string_lossy(), "--dst", &remote]);
        assert!(output.status.success(), "second push failed: {}", stderr(&output));

        let target = dir.path().join("pulled");
        let output = run_sftp(&[
            "pull",
            "--src",
            &remote,
            "--dst",
            &target.to_string_lossy(),
            "--json",
        ]);
        assert!(output.status.success(), "pull failed: {}", stderr(&output));

        let summary: serde_json::Value =
            serde_json::from_str(&stdout(&output)).expect("Invalid JSON output");
        assert_eq!(summary["files"], 3);

        assert_eq!(
            std::fs::read_to_string(target.join("nested/deeper/leaf.txt")).unwrap(),
            "leaf"
        );
        assert_eq!(std::fs::read_to_string(target.join("top.txt")).unwrap(), "top");
    }
}
