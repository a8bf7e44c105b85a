use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

const COMBOS: &str = "Option,1A,1B,1D\nX1,3C,3G,3B\nX2,3A,3E,3F\n";

fn write_csv(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn csv_qualify(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("csv_qualify").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn default_files_and_prompt() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "app.csv", COMBOS);

    csv_qualify(dir.path())
        .write_stdin("3B, 3G ,3C\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CSV converted to JSON and saved as app.json",
        ))
        .stdout(predicate::str::contains("Enter codes separated by commas"))
        .stdout(predicate::str::ends_with("Option: X1, matchup\n"));

    let written: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("app.json")).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([
            { "Option": "X1", "1A": "3C", "1B": "3G", "1D": "3B" },
            { "Option": "X2", "1A": "3A", "1B": "3E", "1D": "3F" }
        ])
    );
}

#[test]
fn json_output_uses_four_space_indent() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "app.csv", "Option,A\nX1,3C\n");

    csv_qualify(dir.path()).args(["-c", "3C"]).assert().success();

    let written = fs::read_to_string(dir.path().join("app.json")).unwrap();
    assert_eq!(
        written,
        "[\n    {\n        \"Option\": \"X1\",\n        \"A\": \"3C\"\n    }\n]"
    );
}

#[test]
fn no_match_is_still_success() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "app.csv", COMBOS);

    csv_qualify(dir.path())
        .args(["--codes", "3G,3Z"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("no match\n"));
}

#[test]
fn custom_file_pair_and_mapping() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "combos.csv", COMBOS);

    csv_qualify(dir.path())
        .args([
            "-i",
            "combos.csv",
            "-o",
            "combos.json",
            "-c",
            "3f,3e,3a",
            "--ignore-case",
            "--show-mapping",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Option: X2, matchup"))
        .stdout(predicate::str::contains("Mapping:\n{\n    \"Option\": \"X2\""));

    assert!(dir.path().join("combos.json").exists());
    assert!(!dir.path().join("app.json").exists());
}

#[test]
fn from_json_reads_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("app.json"),
        r#"[{"Option": "7", "A": "3C", "B": "3G"}]"#,
    )
    .unwrap();

    csv_qualify(dir.path())
        .args(["--from-json", "-c", "3G,3C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CSV converted").not())
        .stdout("Option: 7, matchup\n");
}

#[test]
fn missing_csv_fails() {
    let dir = tempfile::tempdir().unwrap();

    csv_qualify(dir.path())
        .args(["-c", "3C"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("app.csv"));
}

#[test]
fn short_row_is_converted_with_null() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "app.csv", "Option,A,B\nX1,3C,3G\nX2,3A\n");

    csv_qualify(dir.path())
        .args(["-c", "3G,3C"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Option: X1, matchup\n"));

    let written: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("app.json")).unwrap()).unwrap();
    assert_eq!(written[1], json!({ "Option": "X2", "A": "3A", "B": null }));
}

#[test]
fn closed_stdin_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "app.csv", COMBOS);

    csv_qualify(dir.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no codes"));
}
