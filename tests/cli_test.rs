//! End-to-end tests for the arxshelf binary on offline commands.

mod common;

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn arxshelf(data_dir: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_arxshelf"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("ARXSHELF_API_KEY")
        .env_remove("ARXSHELF_LOG")
        .output()?;
    Ok(output)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_list_empty_library() -> Result<()> {
    let dir = TempDir::new()?;

    let output = arxshelf(dir.path(), &["list"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Library is empty"));
    Ok(())
}

#[test]
fn test_save_list_remove() -> Result<()> {
    // Arrange
    let dir = common::data_dir_with_search()?;

    // Act
    let saved = arxshelf(dir.path(), &["save", "1"])?;
    let again = arxshelf(dir.path(), &["save", "2401.00001v1"])?;
    let listed = arxshelf(dir.path(), &["list"])?;
    let removed = arxshelf(dir.path(), &["remove", "1"])?;
    let after = arxshelf(dir.path(), &["list"])?;

    // Assert
    assert!(saved.status.success());
    assert!(stdout(&saved).contains("Saved: Graph Networks for Everything"));
    assert!(stdout(&again).contains("Already saved"));
    assert!(stdout(&listed).contains("2401.00001v1"));
    assert!(stdout(&removed).contains("Removed: Graph Networks for Everything"));
    assert!(stdout(&after).contains("Library is empty"));
    Ok(())
}

#[test]
fn test_save_unknown_reference_fails() -> Result<()> {
    let dir = common::data_dir_with_search()?;

    let output = arxshelf(dir.path(), &["save", "99"])?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No article matches"));
    Ok(())
}

#[test]
fn test_show_prints_plain_abstract() -> Result<()> {
    let dir = common::data_dir_with_library()?;

    let output = arxshelf(dir.path(), &["show", "1"])?;

    let text = stdout(&output);
    assert!(output.status.success());
    assert!(text.contains("We study message passing with torch kernels."));
    assert!(text.contains("[cs.LG]"));
    Ok(())
}

#[test]
fn test_render_writes_html() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let input = dir.path().join("notes.md");
    fs::write(&input, "# Notes\nSome **bold** text.\n```rust\nfn main() {}\n```\n")?;

    // Act
    let output = arxshelf(dir.path(), &["render", input.to_str().expect("UTF8 path")])?;

    // Assert
    assert!(output.status.success());
    let html = fs::read_to_string(dir.path().join("notes.html"))?;
    assert!(html.contains("<title>notes - arxshelf</title>"));
    assert!(html.contains("md-heading-1"));
    assert!(html.contains("bold</strong>"));
    assert!(html.contains("language-rust"));
    assert!(dir.path().join("assets/document.css").exists());
    Ok(())
}

#[test]
fn test_settings_roundtrip_and_validation() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;

    // Act
    let set = arxshelf(
        dir.path(),
        &["settings", "--api-key", "sk-1234567890abcd", "--max-results", "25"],
    )?;
    let shown = arxshelf(dir.path(), &["settings"])?;
    let invalid = arxshelf(dir.path(), &["settings", "--base-font-size", "0.5"])?;

    // Assert
    assert!(set.status.success());
    let text = stdout(&shown);
    assert!(text.contains("max_results      = 25"));
    assert!(text.contains("********abcd"));
    assert!(!text.contains("sk-1234567890abcd"));
    assert!(!invalid.status.success());
    Ok(())
}

#[test]
fn test_summarize_without_key_fails() -> Result<()> {
    let dir = common::data_dir_with_library()?;

    let output = arxshelf(dir.path(), &["summarize", "1"])?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No API key"));
    Ok(())
}

#[test]
fn test_export_without_opening() -> Result<()> {
    let dir = common::data_dir_with_library()?;
    let site = dir.path().join("site");

    let output = arxshelf(
        dir.path(),
        &["export", "--output", site.to_str().expect("UTF8 path"), "--no-open"],
    )?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Exported 2 articles"));
    assert!(site.join("index.html").exists());
    assert!(site.join("articles/2.html").exists());
    Ok(())
}
