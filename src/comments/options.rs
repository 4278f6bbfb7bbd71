//! Comment filtering options and heuristic thresholds.

use serde::{Deserialize, Serialize};

/// Which comment checks run.
///
/// With `enable_filtering` off nothing is ever filtered, whatever the other
/// flags say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub enable_filtering: bool,
    /// Short links, self-promotion, link dumps, repeated-token spam
    pub remove_spam: bool,
    /// Markup, character floods, emoji floods, empty text, gibberish
    pub remove_noise: bool,
    /// "Who's watching in 2024", "first!", "like if you..." bot chatter
    pub remove_unrelated: bool,
}

impl FilterOptions {
    /// Filtering on, every check enabled.
    pub fn enabled() -> Self {
        Self {
            enable_filtering: true,
            remove_spam: true,
            remove_noise: true,
            remove_unrelated: true,
        }
    }

    /// Filtering off.
    pub fn disabled() -> Self {
        Self {
            enable_filtering: false,
            ..Self::enabled()
        }
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::enabled()
    }
}

/// Tunable numbers behind the comment heuristics.
///
/// The defaults were tuned by hand on English and Japanese comment sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterThresholds {
    /// Share of all tokens one repeated token may reach before it is spam
    pub spam_token_ratio: f64,
    /// Minimum tokens before repeated-token spam is considered
    pub spam_min_tokens: usize,
    /// Tokens this short or shorter are ignored when counting repeats
    pub spam_ignore_token_len: usize,
    /// URLs in one comment that make it a link dump
    pub max_urls: usize,
    /// Identical characters in a row that make a comment noise
    pub noise_char_run: usize,
    /// Emoji in a row that make a comment noise
    pub emoji_run: usize,
    /// Minimum length, after stripping spaces and punctuation, for gibberish checks
    pub gibberish_min_len: usize,
    /// Consonants in a row that mark gibberish
    pub consonant_run: usize,
    /// Alphabetically consecutive letters in a row that mark gibberish
    pub alphabet_run: usize,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            spam_token_ratio: 0.4,
            spam_min_tokens: 5,
            spam_ignore_token_len: 2,
            max_urls: 3,
            noise_char_run: 6,
            emoji_run: 5,
            gibberish_min_len: 8,
            consonant_run: 8,
            alphabet_run: 5,
        }
    }
}
