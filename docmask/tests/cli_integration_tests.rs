// docmask/tests/cli_integration_tests.rs
//! Runs the `docmask` binary against documents in temporary directories and
//! checks exit codes, written files and printed reports.

mod common;

use std::fs;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

fn docmask() -> Command {
    let mut cmd = Command::cargo_bin("docmask").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("DOCMASK_CONFIG");
    cmd
}

#[test]
fn redact_writes_suffixed_copy() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("letter.docx");
    write_docx(&input);

    docmask()
        .arg("redact")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("[DOCX]"))
        .stdout(predicate::str::contains("rrn"));

    let output = dir.path().join("letter_redacted.docx");
    assert!(output.exists());
    let document = read_entry(&output, "word/document.xml");
    assert!(document.contains("<w:t>-*******</w:t>"));
}

#[test]
fn explicit_output_and_mask_character() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("book.xlsx");
    let output = dir.path().join("clean.xlsx");
    write_xlsx(&input);

    docmask()
        .args(["-q", "redact"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--mask", "#"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let strings = read_entry(&output, "xl/sharedStrings.xml");
    assert!(strings.contains("<t>###-####</t>"));
}

#[test]
fn output_flag_needs_a_single_input() {
    let dir = tempdir().unwrap();
    write_docx(&dir.path().join("a.docx"));
    write_xlsx(&dir.path().join("b.xlsx"));

    docmask()
        .arg("redact")
        .arg(dir.path())
        .arg("-o")
        .arg(dir.path().join("out.docx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one input"));
}

#[test]
fn directory_batch_uses_out_dir_and_skips_previous_output() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("masked");
    write_docx(&dir.path().join("a.docx"));
    write_pptx(&dir.path().join("b.pptx"));
    write_docx(&dir.path().join("old_redacted.docx"));
    fs::write(dir.path().join("notes.txt"), "kim@example.com").unwrap();

    docmask()
        .arg("redact")
        .arg(dir.path())
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let mut written: Vec<String> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, vec!["a_redacted.docx", "b_redacted.pptx"]);
}

#[test]
fn corrupt_document_sets_exit_code_but_batch_continues() {
    let dir = tempdir().unwrap();
    write_hwpx(&dir.path().join("good.hwpx"));
    fs::write(dir.path().join("bad.docx"), b"not a zip").unwrap();

    docmask()
        .arg("redact")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bad.docx"));

    let output = dir.path().join("good_redacted.hwpx");
    assert!(read_entry(&output, "Contents/section0.xml").contains("***-****-****"));
    assert!(!dir.path().join("bad_redacted.docx").exists());
}

#[test]
fn write_failure_sets_exit_code() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("letter.docx");
    let output = dir.path().join("missing").join("out.docx");
    write_docx(&input);

    docmask()
        .arg("redact")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot write"));

    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn scan_json_reports_rule_counts_without_writing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("book.xlsx");
    write_xlsx(&input);

    let assert = docmask().arg("scan").arg(&input).arg("--json").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(value["documents"][0]["format"], "xlsx");
    assert_eq!(value["documents"][0]["spans"], 2);
    assert_eq!(value["rule_counts"]["email"], 1);
    assert_eq!(value["rule_counts"]["phone_mobile"], 1);
    assert!(value["failures"].as_array().unwrap().is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn quiet_scan_prints_nothing_unless_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("book.xlsx");
    write_xlsx(&input);

    docmask()
        .args(["-q", "scan"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    docmask()
        .args(["-q", "scan", "--json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phone_mobile\": 1"));
}

#[test]
fn disabled_rule_is_left_visible() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("book.xlsx");
    let output = dir.path().join("out.xlsx");
    write_xlsx(&input);

    docmask()
        .args(["-q", "redact", "-x", "email"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let strings = read_entry(&output, "xl/sharedStrings.xml");
    assert!(strings.contains("kim@example.com"));
    assert!(strings.contains("<t>***-****</t>"));
}

#[test]
fn custom_config_adds_a_rule() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("rules.yaml");
    fs::write(
        &config,
        "rules:\n  - name: employee_id\n    pattern: 'EMP-\\d{5}'\n",
    )
    .unwrap();
    let input = dir.path().join("deck.pptx");
    write_container(
        &input,
        &[(
            "ppt/slides/slide1.xml",
            "<p:sld><a:p><a:r><a:t>EMP-12345</a:t></a:r></a:p></p:sld>",
            false,
        )],
    );

    docmask()
        .arg("scan")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"employee_id\": 1"));
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    docmask()
        .arg("scan")
        .arg(dir.path().join("nope.docx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input not found"));
}
