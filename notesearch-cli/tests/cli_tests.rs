//! End-to-end tests for the notesearch binary

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Create a notes directory with two categories
fn create_notes_dir() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();

    temp.child("guides/01-quick-start.md")
        .write_str("---\ntitle: Quick Start\n---\n# Quick Start\n\nInstall the tool and run it.")
        .unwrap();
    temp.child("guides/02-search.md")
        .write_str("---\ntitle: Full-Text Search\ntags: [search]\n---\nThe search box ranks notes with BM25.")
        .unwrap();
    temp.child("network/basics.md")
        .write_str("---\ntitle: Network Basics\n---\nEvery network request goes through the router.")
        .unwrap();

    temp
}

fn notesearch() -> Command {
    let mut cmd = Command::cargo_bin("notesearch").unwrap();
    cmd.env_remove("NOTESEARCH_DATA_DIR").env_remove("NOTESEARCH_DOCS");
    cmd
}

#[test]
fn test_search_text_output() {
    let notes = create_notes_dir();

    notesearch()
        .arg("--data-dir")
        .arg(notes.path())
        .args(["search", "network"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Network Basics"))
        .stdout(predicate::str::contains("Quick Start").not());
}

#[test]
fn test_search_json_output() {
    let notes = create_notes_dir();

    let output = notesearch()
        .arg("--data-dir")
        .arg(notes.path())
        .args(["search", "search", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &results[0];
    assert_eq!(first["item"]["title"], "Full-Text Search");
    assert_eq!(first["item"]["category"], "guides");
    assert_eq!(first["item"]["tags"][0], "search");
    assert!(first["score"].as_f64().unwrap() > 0.0);
    assert_eq!(first["matches"][0]["field"], "title");
}

#[test]
fn test_search_typo_needs_fuzzy() {
    let notes = create_notes_dir();

    notesearch()
        .arg("--data-dir")
        .arg(notes.path())
        .args(["search", "netwrok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Network Basics"));

    notesearch()
        .arg("--data-dir")
        .arg(notes.path())
        .args(["search", "netwrok", "--no-fuzzy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));
}

#[test]
fn test_search_category_filter() {
    let notes = create_notes_dir();

    notesearch()
        .arg("--data-dir")
        .arg(notes.path())
        .args(["search", "the", "--category", "network"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Network Basics"))
        .stdout(predicate::str::contains("Quick Start").not());
}

#[test]
fn test_search_highlight() {
    let notes = create_notes_dir();

    notesearch()
        .arg("--data-dir")
        .arg(notes.path())
        .args(["search", "network", "--highlight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<mark>Network</mark> Basics"));
}

#[test]
fn test_search_limit() {
    let notes = create_notes_dir();

    let output = notesearch()
        .arg("--data-dir")
        .arg(notes.path())
        .args(["search", "the", "--limit", "1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 1);
}

#[test]
fn test_search_docs_json_passes_extra_fields() {
    let temp = assert_fs::TempDir::new().unwrap();
    let docs = temp.child("docs.json");
    docs.write_str(
        r#"[
            {"id": 1, "title": "Dark Mode", "content": "Toggle the theme.", "slug": "dark-mode"},
            {"id": 2, "title": "Favorites", "content": "Star a note."}
        ]"#,
    )
    .unwrap();

    let output = notesearch()
        .arg("--docs")
        .arg(docs.path())
        .args(["search", "theme", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results[0]["item"]["slug"], "dark-mode");
    assert_eq!(results.as_array().unwrap().len(), 1);
}

#[test]
fn test_duplicate_ids_fail() {
    let temp = assert_fs::TempDir::new().unwrap();
    let docs = temp.child("docs.json");
    docs.write_str(r#"[{"id": 1, "title": "A"}, {"id": 1, "title": "B"}]"#)
        .unwrap();

    notesearch()
        .arg("--docs")
        .arg(docs.path())
        .args(["search", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate document id: 1"));
}

#[test]
fn test_stats() {
    let notes = create_notes_dir();

    notesearch()
        .arg("--data-dir")
        .arg(notes.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents:       3"));
}

#[test]
fn test_tokenize() {
    notesearch()
        .args(["tokenize", "Rust 入门"])
        .assert()
        .success()
        .stdout("rust\n入\n入门\n门\n");
}

#[test]
fn test_missing_data_dir() {
    let temp = assert_fs::TempDir::new().unwrap();

    notesearch()
        .arg("--data-dir")
        .arg(temp.path().join("missing"))
        .args(["search", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data directory not found"));
}
