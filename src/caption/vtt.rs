//! WebVTT parser.
//!
//! Handles the `WEBVTT` header block, `NOTE`, `STYLE` and `REGION` blocks,
//! optional cue identifiers and cue settings on timing lines.

use super::{is_timing_line, parse_timing_line, split_lines, starts_with_timestamp, Cue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between blocks
    Idle,
    /// Inside the header, a NOTE, STYLE or REGION block
    Skipping,
    /// Collecting text lines of a cue
    Cue,
    /// Inside a cue whose timing line could not be parsed
    BadCue,
}

pub(super) fn parse(content: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut state = State::Idle;
    let mut timing = (0.0, 0.0);
    let mut text_lines: Vec<&str> = Vec::new();

    for raw_line in split_lines(content) {
        let line = raw_line.trim();

        if line.is_empty() {
            if state == State::Cue {
                cues.push(Cue::new(text_lines.join(" "), timing.0, timing.1));
            }
            text_lines.clear();
            state = State::Idle;
            continue;
        }

        if is_timing_line(line) && (state != State::Cue || starts_with_timestamp(line)) {
            if state == State::Cue {
                cues.push(Cue::new(text_lines.join(" "), timing.0, timing.1));
            }
            text_lines.clear();
            match parse_timing_line(line) {
                Some(parsed) => {
                    timing = parsed;
                    state = State::Cue;
                }
                None => {
                    tracing::trace!(line, "skipping cue with malformed timing line");
                    state = State::BadCue;
                }
            }
            continue;
        }

        match state {
            State::Idle => {
                if is_block_header(line) {
                    state = State::Skipping;
                }
                // Anything else is a cue identifier; the timing line follows.
            }
            State::Cue => text_lines.push(line),
            State::Skipping | State::BadCue => {}
        }
    }

    if state == State::Cue {
        cues.push(Cue::new(text_lines.join(" "), timing.0, timing.1));
    }
    cues
}

fn is_block_header(line: &str) -> bool {
    let keyword = line.split_whitespace().next().unwrap_or("");
    matches!(keyword, "WEBVTT" | "NOTE" | "STYLE" | "REGION")
        || line.starts_with("WEBVTT")
        || line.starts_with("Kind:")
        || line.starts_with("Language:")
}
