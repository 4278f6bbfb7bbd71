//! Integration tests for transcript extraction (library and CLI)

use tempfile::TempDir;
use tubesift::text::Language;
use tubesift::{parse_captions, SamplingMode, TranscriptConfig, TranscriptExtractor};

use crate::helpers::{fixtures_dir, load_fixture, run_tubesift, temp_fixture};

fn fixture_arg(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().to_string()
}

fn numbered_srt(count: usize) -> String {
    let mut srt = String::new();
    for i in 0..count {
        srt.push_str(&format!(
            "{}\n00:{:02}:{:02},000 --> 00:{:02}:{:02},500\nsegment number {}\n\n",
            i + 1,
            i / 60,
            i % 60,
            i / 60,
            i % 60,
            i
        ));
    }
    srt
}

// ============================================================================
// Library Tests
// ============================================================================

#[test]
fn srt_fixture_is_cleaned() {
    let (segments, stats) = TranscriptExtractor::default().segments(&load_fixture("sample.srt"));

    let texts: Vec<&str> = segments.iter().map(|s| s.text()).collect();
    assert_eq!(
        texts,
        vec![
            "Welcome back to the channel",
            "Today we look at lifetimes",
            "Thanks for watching!",
        ]
    );
    assert_eq!(segments[2].timestamp(), "1:10");
    assert_eq!(stats.cues_parsed, 6);
    assert_eq!(stats.empty_dropped, 1);
    assert_eq!(stats.short_dropped, 1);
    assert_eq!(stats.duplicates_collapsed, 1);
}

#[test]
fn vtt_fixture_collapses_rolling_captions() {
    let (segments, _) = TranscriptExtractor::default().segments(&load_fixture("sample.vtt"));

    let texts: Vec<&str> = segments.iter().map(|s| s.text()).collect();
    assert_eq!(
        texts,
        vec![
            "so the borrow checker rejects",
            "because the reference outlives the value",
        ]
    );
    assert_eq!(segments[0].timestamp(), "0:03");
}

#[test]
fn vtt_fixture_skips_header_blocks() {
    let cues = parse_captions(&load_fixture("sample.vtt"));
    assert_eq!(cues.len(), 6);
    assert!(cues.iter().all(|c| !c.text.contains("Auto-generated")));
    assert!(cues.iter().all(|c| !c.text.contains("Kind:")));
}

#[test]
fn summary_sampling_of_twelve_segments() {
    let config = TranscriptConfig {
        mode: SamplingMode::Summary,
        max_segments: 10,
        ..Default::default()
    };
    let result = TranscriptExtractor::new(config).extract(&numbered_srt(12));

    assert_eq!(result.total_segments, 12);
    assert_eq!(result.segments.len(), 10);
    assert!(result.is_truncated);
    let message = result.message.unwrap();
    assert!(message.contains("1 intro, 2 middle, 7 conclusion"), "{}", message);
}

#[test]
fn every_mode_respects_budget() {
    let srt = numbered_srt(150);
    for mode in [SamplingMode::Full, SamplingMode::Smart, SamplingMode::Summary] {
        let config = TranscriptConfig {
            mode,
            max_segments: 25,
            ..Default::default()
        };
        let result = TranscriptExtractor::new(config).extract(&srt);
        assert_eq!(result.total_segments, 150);
        assert!(result.segments.len() <= 25);
        assert!(result.is_truncated);
        assert_eq!(result.segments[0].text(), "segment number 0");
        assert!(result
            .segments
            .windows(2)
            .all(|w| w[0].start() < w[1].start()));
    }
}

#[test]
fn japanese_progressive_cues_merge() {
    let srt = "1\n00:00:01,000 --> 00:00:03,000\nこんにちは\n\n2\n00:00:03,500 --> 00:00:06,000\nこんにちは世界\n";
    let result = TranscriptExtractor::default().extract(srt);

    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].text(), "こんにちは世界");
    assert_eq!(result.language, Language::Japanese);
}

// ============================================================================
// CLI Tests
// ============================================================================

#[test]
fn transcript_prints_timestamped_lines() {
    let (stdout, stderr, exit_code) = run_tubesift(&["transcript", &fixture_arg("sample.srt")]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout,
        "[0:02] Welcome back to the channel\n[0:04] Today we look at lifetimes\n[1:10] Thanks for watching!\n"
    );
}

#[test]
fn transcript_json_output() {
    let (stdout, stderr, exit_code) =
        run_tubesift(&["transcript", &fixture_arg("sample.vtt"), "--json"]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["totalSegments"], 2);
    assert_eq!(json["isTruncated"], false);
    assert_eq!(json["segments"][0]["text"], "so the borrow checker rejects");
    assert_eq!(json["language"], "english");
}

#[test]
fn transcript_cli_overrides_budget_and_mode() {
    let dir = TempDir::new().unwrap();
    let path = temp_fixture(&dir, "long.srt", &numbered_srt(12));
    let (stdout, stderr, exit_code) = run_tubesift(&[
        "transcript",
        path.to_str().unwrap(),
        "--mode",
        "summary",
        "--max-segments",
        "10",
    ]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    let lines: Vec<&str> = stdout.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(lines.len(), 10);
    assert!(stdout.contains("Sampled 10 of 12 segments (summary mode"));
}

#[test]
fn transcript_reads_mode_from_config() {
    let dir = TempDir::new().unwrap();
    let captions = temp_fixture(&dir, "long.srt", &numbered_srt(30));
    let config = temp_fixture(
        &dir,
        "config.toml",
        "[transcript]\nmode = \"full\"\nmax_segments = 3\n",
    );
    let (stdout, stderr, exit_code) = run_tubesift(&[
        "--config",
        config.to_str().unwrap(),
        "transcript",
        captions.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.starts_with("[0:00] segment number 0\n[0:01] segment number 1\n[0:02] segment number 2\n"));
    assert!(stdout.contains("Showing the first 3 of 30 segments (full mode)"));
}

#[test]
fn transcript_missing_file_fails() {
    let (_stdout, stderr, exit_code) = run_tubesift(&["transcript", "/no/such/captions.srt"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("File not found"));
    assert!(stderr.contains("captions.srt"));
}

#[test]
fn transcript_requires_file_argument() {
    let (_stdout, stderr, exit_code) = run_tubesift(&["transcript"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<FILE>"));
}
