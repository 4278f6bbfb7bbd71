//! Heuristic comment classification.
//!
//! A comment is checked for spam, then noise, then unrelated bot chatter; the
//! first category that matches is reported. Fixed vocabularies live in static
//! regex tables, while anything with a tunable number is a scanning helper
//! driven by [`FilterThresholds`].

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::options::{FilterOptions, FilterThresholds};
use super::Comment;
use crate::text::{
    longest_alphabet_run, longest_char_run, longest_consonant_run, longest_emoji_run,
};

/// Why a comment was filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterReason {
    Spam,
    Noise,
    Unrelated,
}

impl std::fmt::Display for FilterReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FilterReason::Spam => "spam",
            FilterReason::Noise => "noise",
            FilterReason::Unrelated => "unrelated",
        })
    }
}

static RE_SHORT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:bit\.ly|tinyurl\.com|goo\.gl|t\.co|ow\.ly|is\.gd|buff\.ly|rebrand\.ly|cutt\.ly|shorturl\.at|tiny\.cc)\b",
    )
    .expect("valid short link regex")
});

static RE_SELF_PROMO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:check\s+out|visit|click(?:\s+on)?|subscribe\s+to|go\s+to)\s+(?:my|our)\s+(?:new\s+)?(?:channel|profile|videos?|link|page)\b",
    )
    .expect("valid self promotion regex")
});

static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bhttps?://\S+|\bwww\.\S+").expect("valid url regex")
});

static RE_HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?[a-z][a-z0-9]*(?:\s[^<>]*)?/?>|&(?:[a-z]+|#[0-9]+|#x[0-9a-f]+);")
        .expect("valid html regex")
});

static RE_TECH_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)github|gitlab|bitbucket|stack\s*overflow|https?://|www\.|\berror:|\bwarning:|\bfatal:|\b(?:npm|yarn|pnpm|pip|cargo|rustc|git|docker|kubectl|python|node|webpack|vscode|vim|bash|gcc|cmake|sql|json|api)\b",
    )
    .expect("valid technical marker regex")
});

static RE_KEYBOARD_MASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:asdf|qwer|zxcv|hjkl|uiop|fdsa|rewq|wasd){2,}")
        .expect("valid keyboard mash regex")
});

static RE_WHO_WATCHING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bwho(?:'s|’s|s|\s+is|\s+else\s+is)?\s+(?:still\s+)?(?:watching|here|listening)\b.*\b(?:19|20)\d{2}\b",
    )
    .expect("valid who's watching regex")
});

static RE_ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:first|1st|second|2nd|third|3rd)\s*[!.]*\s*$")
        .expect("valid ordinal regex")
});

static RE_ANYONE_HERE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:anyone(?:\s+else)?|any\s+one|who\s+else)(?:'s|’s|\s+is)?\s+(?:still\s+)?(?:here|watching|listening)\b",
    )
    .expect("valid anyone here regex")
});

static RE_LIKE_IF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:like|thumbs\s+up)\s+if\s+you\b").expect("valid like-if regex")
});

/// Characters removed before the gibberish length check.
fn is_basic_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ';' | ':' | '\'' | '"' | '-' | '(' | ')' | '。' | '、' | '！' | '？'
    )
}

/// Classify a comment with the default thresholds.
///
/// Returns `None` when the comment should be kept.
pub fn classify(
    comment: &Comment,
    options: &FilterOptions,
    video_author_channel_id: &str,
) -> Option<FilterReason> {
    classify_with_thresholds(
        comment,
        options,
        video_author_channel_id,
        &FilterThresholds::default(),
    )
}

/// Classify a comment with explicit thresholds.
pub fn classify_with_thresholds(
    comment: &Comment,
    options: &FilterOptions,
    video_author_channel_id: &str,
    thresholds: &FilterThresholds,
) -> Option<FilterReason> {
    if !options.enable_filtering {
        return None;
    }
    if !video_author_channel_id.is_empty() && comment.author_channel_id == video_author_channel_id
    {
        return None;
    }

    let text = comment.text.as_str();
    if options.remove_spam && is_spam(text, thresholds) {
        return Some(FilterReason::Spam);
    }
    if options.remove_noise && is_noise(text, thresholds) {
        return Some(FilterReason::Noise);
    }
    if options.remove_unrelated && is_unrelated(text) {
        return Some(FilterReason::Unrelated);
    }
    None
}

/// True when the comment should be removed.
pub fn should_filter(
    comment: &Comment,
    options: &FilterOptions,
    video_author_channel_id: &str,
) -> bool {
    classify(comment, options, video_author_channel_id).is_some()
}

/// Short links, self-promotion, link dumps and repeated-token spam.
pub fn is_spam(text: &str, thresholds: &FilterThresholds) -> bool {
    RE_SHORT_LINK.is_match(text)
        || RE_SELF_PROMO.is_match(text)
        || RE_URL.find_iter(text).count() >= thresholds.max_urls
        || has_repeated_token_spam(text, thresholds)
}

/// One token making up too large a share of a long enough comment.
pub fn has_repeated_token_spam(text: &str, thresholds: &FilterThresholds) -> bool {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() || tokens.len() < thresholds.spam_min_tokens {
        return false;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        if token.chars().count() > thresholds.spam_ignore_token_len {
            *counts.entry(token.as_str()).or_default() += 1;
        }
    }

    let total = tokens.len() as f64;
    counts
        .values()
        .any(|&count| count as f64 / total > thresholds.spam_token_ratio)
}

/// Markup, character floods, emoji floods, empty text and gibberish.
pub fn is_noise(text: &str, thresholds: &FilterThresholds) -> bool {
    text.trim().is_empty()
        || RE_HTML.is_match(text)
        || longest_char_run(text) >= thresholds.noise_char_run
        || longest_emoji_run(text) >= thresholds.emoji_run
        || is_gibberish(text, thresholds)
}

/// Keyboard mashing and random letter strings.
///
/// Technical comments (stack traces, tool names, links) are never gibberish;
/// their identifiers regularly trip the consonant check.
pub fn is_gibberish(text: &str, thresholds: &FilterThresholds) -> bool {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !is_basic_punctuation(*c))
        .collect();
    if stripped.chars().count() < thresholds.gibberish_min_len {
        return false;
    }
    if RE_TECH_MARKER.is_match(text) {
        return false;
    }

    RE_KEYBOARD_MASH.is_match(&stripped)
        || longest_alphabet_run(&stripped) >= thresholds.alphabet_run
        || stripped.chars().all(|c| c.is_ascii_digit())
        || longest_consonant_run(text) >= thresholds.consonant_run
}

/// Bot chatter that says nothing about the video.
pub fn is_unrelated(text: &str) -> bool {
    RE_WHO_WATCHING.is_match(text)
        || RE_ORDINAL.is_match(text)
        || RE_ANYONE_HERE.is_match(text)
        || RE_LIKE_IF.is_match(text)
}
