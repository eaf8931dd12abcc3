//! E2E tests for the head-embed CLI

#![allow(deprecated)] // cargo_bin deprecation - will update when assert_cmd stabilizes replacement

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn head_embed() -> Command {
    Command::cargo_bin("head-embed").unwrap()
}

#[test]
fn test_help() {
    head_embed()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("embed"))
        .stdout(predicate::str::contains("local"));
}

#[test]
fn test_version() {
    head_embed()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("head-embed"));
}

#[test]
fn test_embed_help() {
    head_embed()
        .args(["embed", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--header"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_embed_no_args() {
    head_embed()
        .arg("embed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_embed_invalid_url_prints_notice() {
    head_embed()
        .args(["embed", "http://[::1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error:"))
        .stdout(predicate::str::contains("failed to parse URL"));
}

#[test]
fn test_embed_bad_header_argument() {
    head_embed()
        .args(["embed", "example.com", "-H", "no-colon-here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid header"));
}

#[test]
fn test_local_rewrites_links() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.html");
    fs::write(
        &file_path,
        r#"<html><head><link href="/style.css"><title>Saved</title></head><body></body></html>"#,
    )
    .unwrap();

    head_embed()
        .args(["local", file_path.to_str().unwrap(), "--base", "example.com/page"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"href="https://example.com/style.css""#,
        ))
        .stdout(predicate::str::contains("<title>Saved</title>"));
}

#[test]
fn test_local_json_report() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.html");
    fs::write(&file_path, "<head><title>x</title>").unwrap();

    head_embed()
        .args([
            "local",
            file_path.to_str().unwrap(),
            "--base",
            "https://example.com/",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ok":false"#))
        .stdout(predicate::str::contains("Error:"));
}

#[test]
fn test_local_file_not_found() {
    head_embed()
        .args(["local", "nonexistent.html", "--base", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
