//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn coursecheck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("coursecheck").unwrap()
}

fn write_answers(dir: &Path, name: &str, answers: &[(&str, &str)]) -> PathBuf {
    let mut toml = String::new();
    for (id, value) in answers {
        toml.push_str(&format!(
            "[[answers]]\nquestion_id = \"{id}\"\nvalue = {value}\n\n"
        ));
    }
    let path = dir.join(name);
    std::fs::write(&path, toml).unwrap();
    path
}

/// Run `assess --format json` into its own directory and return the saved file.
fn assess_to_json(dir: &Path, name: &str, answers: &[(&str, &str)]) -> PathBuf {
    let answers_path = write_answers(dir, &format!("{name}.toml"), answers);
    let out = dir.join(name);

    coursecheck()
        .current_dir(dir)
        .arg("assess")
        .arg("--answers")
        .arg(&answers_path)
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|e| e == "json"))
        .unwrap()
}

const AUDIT_JSON: &str = r#"{
    "source": "https://course.example.org/unit-1",
    "violations": [{
        "id": "image-alt",
        "impact": "critical",
        "description": "Images must have alternate text",
        "help": "Add an alt attribute",
        "help_url": "https://example.org/image-alt",
        "nodes": [
            { "target": ["img.hero"], "html": "<img class=\"hero\">", "failure_summary": "" }
        ]
    }],
    "passes": [{ "id": "document-title", "description": "Documents must have a title" }],
    "incomplete": [],
    "timestamp": "2025-01-01T00:00:00Z"
}"#;

#[test]
fn help_output() {
    coursecheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Course accessibility"));
}

#[test]
fn version_output() {
    coursecheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("coursecheck"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    coursecheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created coursecheck.toml"))
        .stdout(predicate::str::contains("Created answers/example.toml"));

    assert!(dir.path().join("coursecheck.toml").exists());
    assert!(dir.path().join("answers/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    coursecheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    coursecheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_example_answers_are_valid() {
    let dir = TempDir::new().unwrap();

    coursecheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    coursecheck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--answers")
        .arg("answers/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("28 questions"))
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn questions_lists_builtin_catalog() {
    coursecheck()
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::contains("28 questions"))
        .stdout(predicate::str::contains("color-contrast"))
        .stdout(predicate::str::contains("assistive-tech-testing"));
}

#[test]
fn questions_category_filter() {
    coursecheck()
        .arg("questions")
        .arg("--category")
        .arg("auditory")
        .assert()
        .success()
        .stdout(predicate::str::contains("video-captions"))
        .stdout(predicate::str::contains("color-contrast").not())
        .stdout(predicate::str::contains("5 question(s) shown"));
}

#[test]
fn questions_unknown_category() {
    coursecheck()
        .arg("questions")
        .arg("--category")
        .arg("olfactory")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn assess_prints_summary() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(
        dir.path(),
        "answers.toml",
        &[("color-contrast", "\"no\""), ("video-captions", "\"yes\"")],
    );

    coursecheck()
        .current_dir(dir.path())
        .arg("assess")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall:"))
        .stdout(predicate::str::contains("Critical"))
        .stdout(predicate::str::contains("Fix Color Contrast Issues"));
}

#[test]
fn assess_writes_json() {
    let dir = TempDir::new().unwrap();
    let path = assess_to_json(
        dir.path(),
        "run",
        &[("video-captions", "\"yes\""), ("font-readability", "5")],
    );

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(saved["category_scores"]["auditory"], 25);
    assert_eq!(saved["answers"].as_array().unwrap().len(), 2);
    assert!(saved["recommendations"].as_array().unwrap().len() <= 15);
}

#[test]
fn assess_all_formats() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), "answers.toml", &[("text-size", "\"yes\"")]);
    let out = dir.path().join("out");

    coursecheck()
        .current_dir(dir.path())
        .arg("assess")
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("all")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let mut extensions: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .extension()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, vec!["csv", "html", "json"]);
}

#[test]
fn assess_strict_rejects_bad_answers() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(
        dir.path(),
        "answers.toml",
        &[("color-contrast", "\"maybe\""), ("not-a-question", "\"yes\"")],
    );

    coursecheck()
        .current_dir(dir.path())
        .arg("assess")
        .arg("--answers")
        .arg(&answers)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-question"))
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn assess_lenient_by_default() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(
        dir.path(),
        "answers.toml",
        &[("color-contrast", "\"maybe\""), ("not-a-question", "\"yes\"")],
    );

    coursecheck()
        .current_dir(dir.path())
        .arg("assess")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success();
}

#[test]
fn assess_nonexistent_answers() {
    coursecheck()
        .arg("assess")
        .arg("--answers")
        .arg("no_such_answers.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_reports_answer_issues() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(
        dir.path(),
        "answers.toml",
        &[("not-a-question", "\"yes\""), ("clear-navigation", "9")],
    );

    coursecheck()
        .arg("validate")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("[not-a-question] WARNING: unknown question ID"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn validate_custom_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("catalog.toml");
    std::fs::write(
        &catalog,
        r#"[catalog]
id = "tiny"
name = "Tiny catalog"

[[questions]]
id = "captions"
text = "Are videos captioned?"
type = "yes-no"
category = "auditory"
weight = 0
"#,
    )
    .unwrap();

    coursecheck()
        .arg("validate")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tiny catalog (1 questions)"))
        .stdout(predicate::str::contains("weight must be positive"));
}

#[test]
fn compare_detects_regression() {
    let dir = TempDir::new().unwrap();
    let baseline = assess_to_json(
        dir.path(),
        "baseline",
        &[("color-contrast", "\"yes\""), ("images-alt-text", "\"yes\"")],
    );
    let current = assess_to_json(dir.path(), "current", &[("color-contrast", "\"yes\"")]);

    coursecheck()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("regressions"))
        .stdout(predicate::str::contains("visual 40% -> 21% (-19)"));

    coursecheck()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--fail-on-regression")
        .assert()
        .code(1);
}

#[test]
fn compare_markdown_output() {
    let dir = TempDir::new().unwrap();
    let baseline = assess_to_json(dir.path(), "baseline", &[("video-captions", "\"no\"")]);
    let current = assess_to_json(dir.path(), "current", &[("video-captions", "\"yes\"")]);

    coursecheck()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("### Improvements"))
        .stdout(predicate::str::contains("| auditory | 0% | 25% | +25 |"));
}

#[test]
fn compare_nonexistent_assessment() {
    coursecheck()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn export_audit_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("audit.json");
    std::fs::write(&input, AUDIT_JSON).unwrap();
    let output = dir.path().join("audit.csv");

    coursecheck()
        .arg("export-audit")
        .arg("--input")
        .arg(&input)
        .arg("--format")
        .arg("csv")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 violation(s)"))
        .stdout(predicate::str::contains("1 critical"));

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Type,Impact,Description,Help,Elements Count,Help URL"));
    assert!(csv.contains("Violation,critical,Images must have alternate text"));
    assert!(csv.contains("Pass,N/A,Documents must have a title"));
}

#[test]
fn export_audit_sarif() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("audit.json");
    std::fs::write(&input, AUDIT_JSON).unwrap();
    let output = dir.path().join("audit.sarif");

    coursecheck()
        .arg("export-audit")
        .arg("--input")
        .arg(&input)
        .arg("--format")
        .arg("sarif")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let sarif: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(sarif["runs"][0]["results"][0]["ruleId"], "image-alt");
    assert_eq!(sarif["runs"][0]["results"][0]["level"], "error");
}

#[test]
fn export_audit_unknown_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("audit.json");
    std::fs::write(&input, AUDIT_JSON).unwrap();

    coursecheck()
        .arg("export-audit")
        .arg("--input")
        .arg(&input)
        .arg("--format")
        .arg("xml")
        .arg("--output")
        .arg(dir.path().join("audit.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
