//! SubRip parser.
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:03,000
//! first line
//! second line
//!
//! 2
//! ...
//! ```

use super::{is_timing_line, parse_timing_line, split_lines, starts_with_timestamp, Cue};

pub(super) fn parse(content: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut current: Option<(f64, f64)> = None;
    let mut text_lines: Vec<&str> = Vec::new();

    for line in split_lines(content) {
        let line = line.trim();

        if line.is_empty() {
            flush(&mut cues, &mut current, &mut text_lines);
            continue;
        }

        // Inside a cue only a line starting with a timestamp ends it; an
        // arrow in ordinary caption text stays text.
        if is_timing_line(line) && (current.is_none() || starts_with_timestamp(line)) {
            // A timing line without a blank line before it still starts a new cue.
            flush(&mut cues, &mut current, &mut text_lines);
            current = parse_timing_line(line);
            if current.is_none() {
                tracing::trace!(line, "skipping cue with malformed timing line");
            }
            continue;
        }

        if current.is_some() {
            text_lines.push(line);
        }
        // Index lines and text of skipped cues fall through here.
    }

    flush(&mut cues, &mut current, &mut text_lines);
    cues
}

fn flush(cues: &mut Vec<Cue>, current: &mut Option<(f64, f64)>, text_lines: &mut Vec<&str>) {
    if let Some((start, end)) = current.take() {
        cues.push(Cue::new(text_lines.join(" "), start, end));
    }
    text_lines.clear();
}
