//! Small text helpers shared by the transcript and comment pipelines.

use serde::{Deserialize, Serialize};

/// Zero-width space, non-joiner and joiner (code points 8203-8205).
const ZERO_WIDTH: [char; 3] = ['\u{200B}', '\u{200C}', '\u{200D}'];

/// Longest entity name we try to decode, including `#x` prefixes.
const MAX_ENTITY_LEN: usize = 10;

/// Decode the named and numeric character references found in captions and
/// comment markup. Unknown references are left as they are.
pub fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| decode_reference(&after[..semi]).map(|d| (d, semi)));

        match decoded {
            Some((replacement, semi)) => {
                if let Some(c) = replacement {
                    result.push(c);
                }
                rest = &after[semi + 1..];
            }
            None => {
                result.push('&');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// Decode the body of one `&...;` reference.
///
/// Returns `Some(None)` for references that decode to nothing (zero-width
/// characters), `None` when the reference is not recognised.
fn decode_reference(name: &str) -> Option<Option<char>> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        let c = char::from_u32(code)?;
        return Some(if ZERO_WIDTH.contains(&c) { None } else { Some(c) });
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "zwsp" | "ZeroWidthSpace" | "zwnj" | "zwj" => return Some(None),
        _ => return None,
    };
    Some(Some(c))
}

/// Remove literal zero-width characters.
pub fn strip_zero_width(text: &str) -> String {
    text.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect()
}

/// Length of the longest run of one repeated non-whitespace character.
pub fn longest_char_run(text: &str) -> usize {
    longest_run_by(text, |prev, c| prev == c && !c.is_whitespace())
}

/// Replace every run of at least `min_run` identical characters with a single
/// instance of that character.
pub fn collapse_char_runs(text: &str, min_run: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut j = i + 1;
        while j < chars.len() && chars[j] == c {
            j += 1;
        }
        let run = j - i;
        if run >= min_run {
            result.push(c);
        } else {
            result.extend(std::iter::repeat(c).take(run));
        }
        i = j;
    }
    result
}

/// Returns true for code points in the common emoji blocks.
pub fn is_emoji(c: char) -> bool {
    matches!(c as u32,
        0x1F300..=0x1F5FF
        | 0x1F600..=0x1F64F
        | 0x1F680..=0x1F6FF
        | 0x1F900..=0x1F9FF
        | 0x1FA70..=0x1FAFF
        | 0x1F1E6..=0x1F1FF
        | 0x2600..=0x26FF
        | 0x2700..=0x27BF)
}

/// Variation selectors, joiners, keycaps and skin tones that attach to the
/// preceding emoji.
fn is_emoji_modifier(c: char) -> bool {
    matches!(c as u32, 0xFE0E | 0xFE0F | 0x200D | 0x20E3 | 0x1F3FB..=0x1F3FF)
}

/// Length of the longest run of consecutive emoji.
///
/// Modifiers neither break a run nor count toward it, so `❤️❤️❤️` is a run of
/// three. A modifier with no emoji before it is not part of any run.
pub fn longest_emoji_run(text: &str) -> usize {
    let mut best = 0;
    let mut current = 0;
    for c in text.chars() {
        if is_emoji_modifier(c) {
            continue;
        }
        if is_emoji(c) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Length of the longest run of consecutive ASCII consonants (`y` counts as a vowel).
pub fn longest_consonant_run(text: &str) -> usize {
    longest_run_where(text, |c| {
        c.is_ascii_alphabetic() && !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
    })
}

/// Length of the longest run of letters that follow each other in the
/// alphabet, like `abcdef` or `LMNOP`.
pub fn longest_alphabet_run(text: &str) -> usize {
    longest_run_by(text, |prev, c| {
        prev.is_ascii_alphabetic()
            && c.is_ascii_alphabetic()
            && c.to_ascii_lowercase() as u32 == prev.to_ascii_lowercase() as u32 + 1
    })
}

fn longest_run_where(text: &str, pred: impl Fn(char) -> bool) -> usize {
    let mut best = 0;
    let mut current = 0;
    for c in text.chars() {
        if pred(c) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

fn longest_run_by(text: &str, continues: impl Fn(char, char) -> bool) -> usize {
    let mut best = 0;
    let mut current = 0;
    let mut prev: Option<char> = None;
    for c in text.chars() {
        current = match prev {
            Some(p) if continues(p, c) => current + 1,
            _ => 1,
        };
        best = best.max(current);
        prev = Some(c);
    }
    best
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Truncate to at most `max_chars` characters. Returns the kept prefix and
/// whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

/// Coarse guess at the language of a text, based on its script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Japanese,
    English,
    Unknown,
}

fn is_kana(c: char) -> bool {
    matches!(c as u32, 0x3040..=0x30FF | 0xFF66..=0xFF9F)
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c as u32, 0x4E00..=0x9FFF | 0x3400..=0x4DBF)
}

/// Guess the language of a transcript or comment.
///
/// Any kana means Japanese (ideographs alone could be Chinese). Otherwise
/// text whose letters are mostly ASCII is treated as English.
pub fn detect_language(text: &str) -> Language {
    let mut ascii_letters = 0usize;
    let mut other_letters = 0usize;

    for c in text.chars() {
        if is_kana(c) {
            return Language::Japanese;
        }
        if c.is_ascii_alphabetic() {
            ascii_letters += 1;
        } else if c.is_alphabetic() || is_cjk_ideograph(c) {
            other_letters += 1;
        }
    }

    if ascii_letters > 0 && ascii_letters >= other_letters * 4 {
        Language::English
    } else {
        Language::Unknown
    }
}
