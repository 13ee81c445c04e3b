/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use botanix::EmbeddedImage;
use common::{ResponseBuilder, WorkspaceBuilder};
use image::ImageFormat;
use predicates::prelude::*;

fn botanix(workspace: &WorkspaceBuilder) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_botanix"));
    cmd.arg("--data-dir").arg(workspace.data_dir());
    cmd
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_botanix"));
    cmd.assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_botanix"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("normalize"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_cli_normalize_to_file() {
    let workspace = WorkspaceBuilder::new().with_image("leaf.png", 2000, 1000, ImageFormat::Png);
    let output = workspace.file("leaf.uri");

    botanix(&workspace)
        .arg("normalize")
        .arg(workspace.file("leaf.png"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: 2000x1000"))
        .stdout(predicate::str::contains("Output: 1024x512 JPEG"));

    let uri = std::fs::read_to_string(output).unwrap();
    let payload = EmbeddedImage::parse(&uri).unwrap();
    assert_eq!(payload.mime_type(), "image/jpeg");
}

#[test]
fn test_cli_normalize_to_stdout() {
    let workspace = WorkspaceBuilder::new().with_image("leaf.jpg", 300, 200, ImageFormat::Jpeg);

    botanix(&workspace)
        .arg("normalize")
        .arg(workspace.file("leaf.jpg"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("data:image/jpeg;base64,"))
        .stderr(predicate::str::contains("Output: 300x200 JPEG"));
}

#[test]
fn test_cli_normalize_skips_non_image() {
    let workspace = WorkspaceBuilder::new().with_file("notes.txt", b"repot in spring");

    botanix(&workspace)
        .arg("normalize")
        .arg(workspace.file("notes.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("not an image"));
}

#[test]
fn test_cli_normalize_corrupt_image_fails() {
    let workspace = WorkspaceBuilder::new().with_file("broken.png", b"\x89PNG\r\n\x1a\n\0\0");

    botanix(&workspace)
        .arg("normalize")
        .arg(workspace.file("broken.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to normalize image"));
}

#[test]
fn test_cli_normalize_oversized_file_fails() {
    let workspace = WorkspaceBuilder::new();
    let path = workspace.file("huge.jpg");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(botanix::normalizer::MAX_SOURCE_BYTES + 1).unwrap();

    botanix(&workspace)
        .arg("normalize")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

#[test]
fn test_cli_import_history_show() {
    let workspace = WorkspaceBuilder::new()
        .with_image("basil.png", 640, 480, ImageFormat::Png)
        .with_response("basil.json", &ResponseBuilder::new());

    botanix(&workspace)
        .arg("import")
        .arg(workspace.file("basil.png"))
        .arg(workspace.file("basil.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Basil\nOcimum basilicum"))
        .stdout(predicate::str::contains("Nutrient Deficient"));

    let output = botanix(&workspace).arg("history").assert().success().get_output().clone();
    let listing = String::from_utf8(output.stdout).unwrap();
    assert_eq!(listing.lines().count(), 1);
    assert!(listing.contains("Basil (Ocimum basilicum) 92% [Nutrient Deficient]"));

    let short_id = listing.split_whitespace().next().unwrap();
    botanix(&workspace)
        .arg("show")
        .arg(short_id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Similar species"))
        .stdout(predicate::str::contains("Apply nitrogen fertilizer"));
}

#[test]
fn test_cli_import_invalid_response_is_rejected() {
    let workspace = WorkspaceBuilder::new()
        .with_image("basil.png", 64, 64, ImageFormat::Png)
        .with_response("bad.json", &ResponseBuilder::new().without("diagnostics"));

    botanix(&workspace)
        .arg("import")
        .arg(workspace.file("basil.png"))
        .arg(workspace.file("bad.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not identify plant"));

    botanix(&workspace)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No identifications yet"));
}

#[test]
fn test_cli_show_unknown_id() {
    let workspace = WorkspaceBuilder::new();

    botanix(&workspace)
        .arg("show")
        .arg("does-not-exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No identification with id"));
}

#[test]
fn test_cli_stats_and_clear() {
    let workspace = WorkspaceBuilder::new()
        .with_image("a.png", 64, 64, ImageFormat::Png)
        .with_response("a.json", &ResponseBuilder::new());

    for _ in 0..2 {
        botanix(&workspace)
            .arg("import")
            .arg(workspace.file("a.png"))
            .arg(workspace.file("a.json"))
            .assert()
            .success();
    }

    botanix(&workspace)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total identifications: 2"))
        .stdout(predicate::str::contains("Nutrient Deficient: 2"));

    botanix(&workspace)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 identifications"));

    botanix(&workspace)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total identifications: 0"));
}

#[test]
fn test_cli_data_dir_from_environment() {
    let workspace = WorkspaceBuilder::new();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_botanix"));
    cmd.env("BOTANIX_DATA_DIR", workspace.data_dir())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total identifications: 0"));
}
