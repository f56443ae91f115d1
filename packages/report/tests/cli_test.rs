//! Binary smoke tests for the report tool.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const CLEAN_EXPORT: &str = "0 HEAD\n\
                            1 SOUR FTW\n\
                            2 NAME Family Tree Maker\n\
                            2 VERS 5.0\n\
                            1 GEDC\n\
                            2 VERS 5.5.5\n\
                            0 @SUBM@ SUBM\n\
                            0 @I1@ INDI\n\
                            1 NAME John /Smith/\n\
                            1 SEX M\n\
                            0 @F1@ FAM\n\
                            1 HUSB @I1@\n\
                            0 TRLR\n";

const DIRTY_EXPORT: &str = "0 HEAD\n\
                            0 @SUBM@ SUBM\n\
                            0 @I1@ INDI\n\
                            1 FOO bar\n\
                            0 TRLR\n";

fn write_export(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_check_clean_export_succeeds() {
    let export = write_export(CLEAN_EXPORT);

    Command::cargo_bin("stamboom-report")
        .expect("binary exists")
        .arg("check")
        .arg(export.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Persons: 1"))
        .stdout(predicate::str::contains("Families: 1"))
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn test_check_dirty_export_fails() {
    let export = write_export(DIRTY_EXPORT);

    Command::cargo_bin("stamboom-report")
        .expect("binary exists")
        .arg("check")
        .arg(export.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("line ignored"))
        .stdout(predicate::str::contains("Unused lines: 1"));
}

#[test]
fn test_report_text_output() {
    let export = write_export(CLEAN_EXPORT);

    Command::cargo_bin("stamboom-report")
        .expect("binary exists")
        .arg("report")
        .arg(export.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Stamboom report"))
        .stdout(predicate::str::contains("@I1@ John Smith"))
        .stdout(predicate::str::contains("Format:    GEDCOM 5.5.5"));
}

#[test]
fn test_report_json_output() {
    let export = write_export(CLEAN_EXPORT);

    Command::cargo_bin("stamboom-report")
        .expect("binary exists")
        .args(["report", "--format", "json"])
        .arg(export.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"gedcom_version\": \"5.5.5\""))
        .stdout(predicate::str::contains("John /Smith/"));
}

#[test]
fn test_report_writes_output_file() {
    let export = write_export(CLEAN_EXPORT);
    let target = NamedTempFile::new().expect("create temp file");

    Command::cargo_bin("stamboom-report")
        .expect("binary exists")
        .arg("report")
        .arg(export.path())
        .arg("--output")
        .arg(target.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"));

    let written = std::fs::read_to_string(target.path()).expect("read report");
    assert!(written.contains("@I1@ John Smith"));
}

#[test]
fn test_missing_file_reports_error() {
    Command::cargo_bin("stamboom-report")
        .expect("binary exists")
        .args(["check", "/nonexistent/path/family.ged"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
