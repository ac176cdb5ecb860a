//! Integration tests for the docpress CLI
//!
//! Conversion tests substitute a stub shell script for LibreOffice so they
//! run without an office suite installed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a CLI command
fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_docpress"))
}

/// Stub standing in for `soffice --headless --convert-to <fmt> --outdir
/// <dir> <input>`. Copies the input to `<dir>/<stem>.<fmt>`, but fails any
/// input file named `bad.*`.
#[cfg(unix)]
fn stub_libreoffice(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("stub-soffice");
    fs::write(
        &path,
        "#!/bin/sh\n\
         name=$(basename \"$6\")\n\
         case \"$name\" in bad.*) echo boom >&2; exit 1;; esac\n\
         cp \"$6\" \"$5/${name%.*}.$3\"\n",
    )
    .unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
fn test_help_text() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Convert office documents to PDF and other formats",
        ));
}

#[test]
fn test_convert_help_text() {
    cli()
        .arg("convert")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--recursive"))
        .stdout(predicate::str::contains("--engine"))
        .stdout(predicate::str::contains("--binary"));
}

#[test]
fn test_formats_lists_supported_extensions() {
    cli()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOCX"))
        .stdout(predicate::str::contains(".pptx"))
        .stdout(predicate::str::contains(".htm"));
}

#[test]
fn test_convert_tool_unavailable_exits_one() {
    let input_dir = TempDir::new().unwrap();
    fs::write(input_dir.path().join("a.docx"), b"word").unwrap();
    let output_dir = input_dir.path().join("out");

    cli()
        .arg("convert")
        .arg(input_dir.path())
        .arg("-o")
        .arg(&output_dir)
        .arg("--binary")
        .arg("/nonexistent/docpress-binary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Install the conversion tool"));

    // The batch was aborted before any filesystem work.
    assert!(!output_dir.exists());
}

#[cfg(unix)]
#[test]
fn test_convert_empty_directory_exits_zero() {
    let root = TempDir::new().unwrap();
    let stub = stub_libreoffice(root.path());
    let input_dir = root.path().join("input");
    fs::create_dir(&input_dir).unwrap();

    cli()
        .arg("convert")
        .arg(&input_dir)
        .arg("-o")
        .arg(root.path().join("out"))
        .arg("--binary")
        .arg(&stub)
        .assert()
        .success()
        .stderr(predicate::str::contains("No supported files found"));
}

#[cfg(unix)]
#[test]
fn test_convert_directory_batch() {
    let root = TempDir::new().unwrap();
    let stub = stub_libreoffice(root.path());
    let input_dir = root.path().join("input");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("a.docx"), b"word").unwrap();
    fs::write(input_dir.join("b.exe"), b"binary").unwrap();
    fs::write(input_dir.join("c.PPTX"), b"slides").unwrap();
    let output_dir = root.path().join("out");

    cli()
        .arg("convert")
        .arg(&input_dir)
        .arg("-o")
        .arg(&output_dir)
        .arg("--engine")
        .arg("libreoffice")
        .arg("--binary")
        .arg(&stub)
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 2 file(s) to convert"))
        .stderr(predicate::str::contains("Success:"));

    // Unsupported b.exe was filtered out; the uppercase extension was not.
    assert!(output_dir.join("a.pdf").exists());
    assert!(output_dir.join("c.pdf").exists());
    assert_eq!(fs::read_dir(&output_dir).unwrap().count(), 2);
}

#[cfg(unix)]
#[test]
fn test_convert_single_file() {
    let root = TempDir::new().unwrap();
    let stub = stub_libreoffice(root.path());
    let input = root.path().join("report.docx");
    fs::write(&input, b"word").unwrap();
    let output_dir = root.path().join("out");

    cli()
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output_dir)
        .arg("--binary")
        .arg(&stub)
        .assert()
        .success()
        .stderr(predicate::str::contains("report.docx"));

    assert!(output_dir.join("report.pdf").exists());
}

#[cfg(unix)]
#[test]
fn test_convert_partial_failure_exits_zero() {
    let root = TempDir::new().unwrap();
    let stub = stub_libreoffice(root.path());
    let input_dir = root.path().join("input");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("good.docx"), b"fine").unwrap();
    fs::write(input_dir.join("bad.docx"), b"poison").unwrap();
    let output_dir = root.path().join("out");

    cli()
        .arg("convert")
        .arg(&input_dir)
        .arg("-o")
        .arg(&output_dir)
        .arg("--binary")
        .arg(&stub)
        .assert()
        .success() // one failed file does not fail the run
        .stderr(predicate::str::contains("✗"))
        .stderr(predicate::str::contains("Failed:"));

    assert!(output_dir.join("good.pdf").exists());
    assert!(!output_dir.join("bad.pdf").exists());
}

#[cfg(unix)]
#[test]
fn test_convert_alternate_format() {
    let root = TempDir::new().unwrap();
    let stub = stub_libreoffice(root.path());
    let input = root.path().join("page.odt");
    fs::write(&input, b"text").unwrap();
    let output_dir = root.path().join("out");

    cli()
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output_dir)
        .arg("-f")
        .arg("html")
        .arg("--binary")
        .arg(&stub)
        .assert()
        .success();

    assert!(output_dir.join("page.html").exists());
}

#[cfg(unix)]
#[test]
fn test_convert_recursive_flag() {
    let root = TempDir::new().unwrap();
    let stub = stub_libreoffice(root.path());
    let input_dir = root.path().join("input");
    let nested = input_dir.join("nested");
    fs::create_dir_all(&nested).unwrap();
    fs::write(input_dir.join("top.docx"), b"x").unwrap();
    fs::write(nested.join("inner.odt"), b"y").unwrap();
    let output_dir = root.path().join("out");

    cli()
        .arg("convert")
        .arg(&input_dir)
        .arg("-o")
        .arg(&output_dir)
        .arg("-r")
        .arg("--binary")
        .arg(&stub)
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 2 file(s) to convert"));

    assert!(output_dir.join("top.pdf").exists());
    assert!(output_dir.join("inner.pdf").exists());
}

#[test]
fn test_check_missing_binary_exits_one() {
    let workdir = TempDir::new().unwrap();

    cli()
        .current_dir(workdir.path())
        .arg("check")
        .arg("--binary")
        .arg("/nonexistent/docpress-binary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not executable"));
}

#[cfg(unix)]
#[test]
fn test_check_passes_with_resolvable_binary() {
    let workdir = TempDir::new().unwrap();
    let stub = stub_libreoffice(workdir.path());

    cli()
        .current_dir(workdir.path())
        .arg("check")
        .arg("--binary")
        .arg(&stub)
        .assert()
        .success()
        .stderr(predicate::str::contains("All checks passed"));

    // The check bootstraps the conventional data directories.
    assert!(workdir.path().join("data/input").is_dir());
    assert!(workdir.path().join("data/output").is_dir());
}
