//! Duplicate cue collapsing.
//!
//! Streaming auto-captions repeat themselves in a staircase: each cue shows
//! the previous line plus a few new words. This transform keeps only the
//! final, longest step of each staircase and drops exact repeats of the cue
//! right before it.

use super::Transform;
use crate::caption::Cue;

/// Cues this short (in seconds) or shorter are flashes, not speech.
pub const MIN_CUE_DURATION: f64 = 0.1;

/// Collapses repeated and progressively extended cues.
///
/// **Algorithm**, comparing only against the last accepted cue:
/// 1. Cues lasting `MIN_CUE_DURATION` or less are dropped
/// 2. A cue with the same text as the last accepted one is dropped
/// 3. A cue that extends the last accepted text replaces it
/// 4. Anything else is accepted
pub struct CollapseDuplicates {
    collapsed_count: usize,
    short_count: usize,
}

impl CollapseDuplicates {
    pub fn new() -> Self {
        Self {
            collapsed_count: 0,
            short_count: 0,
        }
    }

    /// Number of cues removed as repeats or superseded by an extension.
    pub fn collapsed_count(&self) -> usize {
        self.collapsed_count
    }

    /// Number of cues removed for being too short.
    pub fn short_count(&self) -> usize {
        self.short_count
    }
}

impl Default for CollapseDuplicates {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if `candidate` is `previous` with more text appended.
///
/// Spaced scripts need a word boundary after the prefix ("hello" ->
/// "hello world", but not "hello" -> "helloween"). Text ending in a non-ASCII
/// character, as in Japanese, continues without a space.
pub fn is_progressive_extension(previous: &str, candidate: &str) -> bool {
    if previous.is_empty() || candidate.len() <= previous.len() {
        return false;
    }
    let Some(rest) = candidate.strip_prefix(previous) else {
        return false;
    };

    let boundary_after = rest.starts_with(char::is_whitespace);
    let unspaced_script = previous
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_ascii_alphanumeric());

    boundary_after || unspaced_script
}

impl Transform for CollapseDuplicates {
    fn transform(&mut self, cues: &mut Vec<Cue>) {
        let mut accepted: Vec<Cue> = Vec::with_capacity(cues.len());

        for cue in cues.drain(..) {
            if cue.duration() <= MIN_CUE_DURATION {
                self.short_count += 1;
                continue;
            }

            if let Some(last) = accepted.last_mut() {
                if last.text == cue.text {
                    self.collapsed_count += 1;
                    continue;
                }
                if is_progressive_extension(&last.text, &cue.text) {
                    *last = cue;
                    self.collapsed_count += 1;
                    continue;
                }
            }
            accepted.push(cue);
        }

        *cues = accepted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(cues: &[Cue]) -> Vec<&str> {
        cues.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn keeps_last_step_of_progressive_staircase() {
        let mut deduper = CollapseDuplicates::new();
        let mut cues = vec![
            Cue::new("hello", 0.0, 1.0),
            Cue::new("hello world", 1.0, 2.0),
            Cue::new("hello world today", 2.0, 3.0),
        ];

        deduper.transform(&mut cues);

        assert_eq!(texts(&cues), vec!["hello world today"]);
        assert_eq!(cues[0].start, 2.0);
        assert_eq!(deduper.collapsed_count(), 2);
    }

    #[test]
    fn collapses_japanese_extension_without_space() {
        let mut deduper = CollapseDuplicates::new();
        let mut cues = vec![
            Cue::new("こんにちは", 1.0, 3.0),
            Cue::new("こんにちは世界", 3.5, 6.0),
        ];

        deduper.transform(&mut cues);

        assert_eq!(texts(&cues), vec!["こんにちは世界"]);
    }

    #[test]
    fn drops_exact_repeat_of_previous() {
        let mut deduper = CollapseDuplicates::new();
        let mut cues = vec![
            Cue::new("same line", 0.0, 1.0),
            Cue::new("same line", 1.0, 2.0),
            Cue::new("next", 2.0, 3.0),
        ];

        deduper.transform(&mut cues);

        assert_eq!(texts(&cues), vec!["same line", "next"]);
    }

    #[test]
    fn keeps_repeats_separated_by_other_text() {
        let mut deduper = CollapseDuplicates::new();
        let mut cues = vec![
            Cue::new("yes", 0.0, 1.0),
            Cue::new("no", 1.0, 2.0),
            Cue::new("yes", 2.0, 3.0),
        ];

        deduper.transform(&mut cues);

        assert_eq!(texts(&cues), vec!["yes", "no", "yes"]);
    }

    #[test]
    fn drops_flash_cues_without_changing_state() {
        let mut deduper = CollapseDuplicates::new();
        let mut cues = vec![
            Cue::new("first", 0.0, 1.0),
            Cue::new("blink", 1.0, 1.05),
            Cue::new("first", 1.1, 2.0),
        ];

        deduper.transform(&mut cues);

        // The flash never became the last accepted cue, so the repeat collapses.
        assert_eq!(texts(&cues), vec!["first"]);
        assert_eq!(deduper.short_count(), 1);
    }

    #[test]
    fn exact_threshold_duration_is_dropped() {
        let mut deduper = CollapseDuplicates::new();
        let mut cues = vec![Cue::new("tick", 0.0, 0.1), Cue::new("tock", 1.0, 0.5)];

        deduper.transform(&mut cues);

        assert!(cues.is_empty());
    }

    #[test]
    fn word_prefix_without_boundary_is_not_an_extension() {
        assert!(!is_progressive_extension("hello", "helloween"));
        assert!(is_progressive_extension("hello", "hello there"));
        assert!(is_progressive_extension("こんにちは", "こんにちは世界"));
        assert!(!is_progressive_extension("same", "same"));
        assert!(!is_progressive_extension("", "anything"));
    }
}
