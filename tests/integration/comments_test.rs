//! Integration tests for comment filtering (library and CLI)

use tempfile::TempDir;
use tubesift::{CommentBatch, CommentFilter, FilterOptions};

use crate::helpers::{fixtures_dir, load_fixture, run_tubesift, temp_fixture};

fn fixture_arg() -> String {
    fixtures_dir()
        .join("comments.json")
        .to_string_lossy()
        .to_string()
}

fn ids(value: &serde_json::Value) -> Vec<String> {
    value["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Library Tests
// ============================================================================

#[test]
fn fixture_pages_are_concatenated() {
    let batch = CommentBatch::from_json(&load_fixture("comments.json")).unwrap();
    let ids: Vec<&str> = batch.comments.iter().map(|c| c.id.as_str()).collect();

    assert_eq!(ids, vec!["c1", "c2", "c3", "c4", "c5"]);
    assert_eq!(batch.comments[0].replies.len(), 2);
    assert!(!batch.has_more);
}

#[test]
fn fixture_filtering_keeps_signal() {
    let batch = CommentBatch::from_json(&load_fixture("comments.json")).unwrap();
    let result = CommentFilter::new(FilterOptions::enabled(), "").apply(batch);

    assert_eq!(result.comments.len(), 1);
    assert_eq!(result.comments[0].id, "c1");
    let reply_ids: Vec<&str> = result.comments[0]
        .replies
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(reply_ids, vec!["c1r1"]);
    assert_eq!(result.stats.total, 5);
    assert_eq!(result.stats.filtered, 4);
    assert_eq!(result.stats.filter_rate, "80.0");
}

#[test]
fn disabled_filtering_is_identity() {
    let batch = CommentBatch::from_json(&load_fixture("comments.json")).unwrap();
    let original = batch.comments.clone();
    let result = CommentFilter::new(FilterOptions::disabled(), "").apply(batch);

    assert_eq!(result.comments, original);
    assert_eq!(result.stats.filtered, 0);
}

// ============================================================================
// CLI Tests
// ============================================================================

#[test]
fn comments_json_output() {
    let (stdout, stderr, exit_code) = run_tubesift(&["comments", &fixture_arg(), "--json"]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ids(&json), vec!["c1"]);
    assert_eq!(json["stats"]["kept"], 1);
    assert_eq!(json["stats"]["filterRate"], "80.0");
    assert_eq!(json["hasMore"], false);
    assert_eq!(json["comments"][0]["authorChannelId"], "UCann");
}

#[test]
fn comments_author_is_exempt() {
    let (stdout, stderr, exit_code) = run_tubesift(&[
        "comments",
        &fixture_arg(),
        "--author-channel-id",
        "UCcreator",
        "--json",
    ]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ids(&json), vec!["c1", "c4"]);
    assert_eq!(json["stats"]["filterRate"], "60.0");
}

#[test]
fn comments_keep_unrelated_flag() {
    let (stdout, _stderr, exit_code) = run_tubesift(&[
        "comments",
        &fixture_arg(),
        "--keep-unrelated",
        "--json",
    ]);

    assert_eq!(exit_code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ids(&json), vec!["c1", "c2", "c5"]);
}

#[test]
fn comments_no_filter_keeps_everything() {
    let (stdout, _stderr, exit_code) =
        run_tubesift(&["comments", &fixture_arg(), "--no-filter", "--json"]);

    assert_eq!(exit_code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ids(&json), vec!["c1", "c2", "c3", "c4", "c5"]);
    assert_eq!(json["comments"][0]["replies"].as_array().unwrap().len(), 2);
    assert_eq!(json["stats"]["filtered"], 0);
}

#[test]
fn comments_text_output() {
    let (stdout, stderr, exit_code) = run_tubesift(&["comments", &fixture_arg()]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.starts_with("Ann (42 likes): The explanation"));
    assert!(stdout.contains("    Bo (3 likes): Same here"));
    assert!(!stdout.contains("First!"));
    assert!(stdout.contains("Kept 1 of 5 comments (80.0% filtered)"));
}

#[test]
fn comments_reports_more_pages() {
    let dir = TempDir::new().unwrap();
    let path = temp_fixture(
        &dir,
        "page.json",
        r#"{"comments": [{"id": "a", "text": "helpful, thanks"}], "nextPageToken": "next"}"#,
    );
    let (stdout, _stderr, exit_code) = run_tubesift(&["comments", path.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Kept 1 of 1 comments"));
    assert!(stdout.contains("More comments are available upstream"));
}

#[test]
fn comments_config_disables_filter() {
    let dir = TempDir::new().unwrap();
    let config = temp_fixture(&dir, "config.toml", "[filter]\nenabled = false\n");
    let (stdout, _stderr, exit_code) = run_tubesift(&[
        "--config",
        config.to_str().unwrap(),
        "comments",
        &fixture_arg(),
        "--json",
    ]);

    assert_eq!(exit_code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["stats"]["kept"], 5);
}

#[test]
fn comments_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let path = temp_fixture(&dir, "broken.json", "{ not json");
    let (_stdout, stderr, exit_code) = run_tubesift(&["comments", path.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to decode comments"));
}
