//! Transcript command handler

use std::path::Path;

use anyhow::Result;

use tubesift::{SamplingMode, TranscriptExtractor, TranscriptResult};

use super::{load_config, read_input};

/// Extract a transcript from a caption file and print it.
///
/// CLI values override the configured mode and segment budget.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    file: &Path,
    mode: Option<SamplingMode>,
    max_segments: Option<usize>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?.transcript;
    if let Some(mode) = mode {
        config.mode = mode;
    }
    if let Some(max_segments) = max_segments {
        config.max_segments = max_segments;
    }

    let content = read_input(file)?;
    let extractor = TranscriptExtractor::new(config);
    let config = extractor.config();
    tracing::info!(file = %file.display(), mode = %config.mode, max = config.max_segments, "extracting transcript");
    let result = extractor.extract(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_text(&result));
    }
    Ok(())
}

/// Plain text rendering: one `[M:SS] text` line per segment.
pub fn render_text(result: &TranscriptResult) -> String {
    let mut out = String::new();
    for segment in &result.segments {
        out.push_str(&format!("[{}] {}\n", segment.timestamp(), segment.text()));
    }
    if let Some(message) = &result.message {
        out.push_str(&format!("\n{}\n", message));
    }
    out
}
