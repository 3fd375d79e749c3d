//! End-to-end tests that run the compiled binary.
//!
//! Run with: `cargo test --test cli`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_billing-answers"))
}

fn run(args: &[&str], cwd: &Path) -> Output {
    bin()
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run billing-answers")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_answer(dir: &Path, file: &str, slug: &str, question: &str, related: Option<&str>) {
    let related = related
        .map(|to| format!("\n[[{slug}.related_questions]]\nslug = \"{to}\"\nquestion = \"Whatever?\"\n"))
        .unwrap_or_default();
    let text = format!(
        r#"[{slug}]
question = "{question}"
meta_title = "{question} | Test"
meta_description = "About {question}"
category = "billing-basics"
answer = "Answer to {question}"
{related}"#
    );
    fs::write(dir.join(file), text).unwrap();
}

#[test]
fn build_bundled_bank() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("dist");
    let output = run(&["build", "--output", out.to_str().unwrap()], tmp.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = stdout(&output);
    assert!(text.contains("==> Build complete"));
    assert!(text.contains("Generated 50 answer pages in 5 categories"));

    let page = fs::read_to_string(out.join("answers/what-is-npi-number/index.html")).unwrap();
    assert!(page.contains(r#"<link rel="canonical" href="https://www.billinganswers.com/answers/what-is-npi-number">"#));
    assert_eq!(page.matches(r#"<script type="application/ld+json">"#).count(), 3);
    assert!(out.join("answers/index.html").exists());
    assert!(out.join("sitemap.xml").exists());
}

#[test]
fn rebuild_reuses_unchanged_files() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("dist");
    let out_arg = out.to_str().unwrap();
    assert!(run(&["build", "--output", out_arg], tmp.path()).status.success());

    let second = run(&["build", "--output", out_arg], tmp.path());
    assert!(second.status.success());
    assert!(stdout(&second).contains("Files: 55 unchanged, 0 written (55 total)"));

    let forced = run(&["build", "--no-cache", "--output", out_arg], tmp.path());
    assert!(stdout(&forced).contains("Files: 55 written"));
}

#[test]
fn check_bundled_bank_is_clean() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["check"], tmp.path());
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("No catalog issues"));
    assert!(text.contains("==> Content is valid"));
}

#[test]
fn strict_check_fails_on_dangling_related() {
    let tmp = TempDir::new().unwrap();
    let answers = tmp.path().join("answers");
    fs::create_dir_all(&answers).unwrap();
    write_answer(
        &answers,
        "010-basics.toml",
        "what-is-medical-billing",
        "What is medical billing?",
        Some("what-is-a-copya"),
    );
    fs::write(tmp.path().join("config.toml"), "[validation]\nstrict = true\n").unwrap();

    let output = run(&["check", "--source", tmp.path().to_str().unwrap()], tmp.path());
    assert!(!output.status.success());
    assert!(stdout(&output).contains("related question what-is-a-copya does not resolve"));
}

#[test]
fn duplicate_slug_fails_by_default() {
    let tmp = TempDir::new().unwrap();
    let answers = tmp.path().join("answers");
    fs::create_dir_all(&answers).unwrap();
    write_answer(&answers, "010-one.toml", "what-is-a-copay", "What is a copay?", None);
    write_answer(&answers, "020-two.toml", "what-is-a-copay", "What is a copay again?", None);

    let output = run(&["check", "--source", tmp.path().to_str().unwrap()], tmp.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("what-is-a-copay"), "{stderr}");
}

#[test]
fn page_json_for_npi() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["page", "what-is-npi-number", "--json"], tmp.path());
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let docs = value["structured_data"].as_array().unwrap();
    assert_eq!(docs[0]["mainEntity"]["answerCount"], 1);
    assert_eq!(docs[1]["mainEntity"].as_array().unwrap().len(), 3);
    assert!(
        value["meta"]["canonical"]
            .as_str()
            .unwrap()
            .ends_with("/answers/what-is-npi-number")
    );
}

#[test]
fn page_unknown_slug_fails() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["page", "what-is-nothing"], tmp.path());
    assert!(!output.status.success());
}

#[test]
fn routes_lists_fifty_paths() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["routes"], tmp.path());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 50);
    assert!(lines.iter().all(|l| l.starts_with("/answers/")));
}

#[test]
fn social_preview_filters_category() {
    let tmp = TempDir::new().unwrap();
    let feed = tmp.path().join("feed.json");
    fs::write(
        &feed,
        r#"{"posts": [
            {"id": "n1", "category": "national", "title": "National news", "twitter": "t", "linkedin": "l"},
            {"id": "s1", "category": "state", "title": "State news", "twitter": "t", "linkedin": "l"}
        ], "counts": {"national": 1, "states": 1, "specialties": 0}}"#,
    )
    .unwrap();

    let output = run(
        &["social", feed.to_str().unwrap(), "--category", "state"],
        tmp.path(),
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("State (1 post)"));
    assert!(!text.contains("National news"));
}

#[test]
fn social_rejects_malformed_feed() {
    let tmp = TempDir::new().unwrap();
    let feed = tmp.path().join("feed.json");
    fs::write(&feed, "not json").unwrap();
    let output = run(&["social", feed.to_str().unwrap()], tmp.path());
    assert!(!output.status.success());
}

#[test]
fn gen_config_round_trips() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["gen-config"], tmp.path());
    assert!(output.status.success());
    fs::write(tmp.path().join("config.toml"), stdout(&output)).unwrap();
    assert!(run(&["check"], tmp.path()).status.success());
}
