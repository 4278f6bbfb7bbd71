//! Caption text normalization.
//!
//! Auto-generated and hand-authored caption tracks are full of markup
//! leftovers: entities, karaoke timing tags, `[Music]` markers, speaker-turn
//! chevrons and stretched characters. [`TextNormalizer`] turns one cue's raw
//! text into plain, single-spaced text, or the empty string when nothing
//! meaningful is left.

use std::sync::LazyLock;

use regex::Regex;

use super::Transform;
use crate::caption::Cue;
use crate::text::{collapse_char_runs, decode_entities, strip_zero_width};

/// Runs of this many identical characters collapse to one.
const CHAR_RUN_COLLAPSE: usize = 4;

/// Inline timing tags and markup: `<00:00:01.000>`, `<c>`, `</i>`, `<v Bob>`.
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z0-9][^<>]*>").expect("valid tag regex"));

/// Sound-effect markers in bracket or parenthesis form.
static RE_SOUND_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[\[(（【［]\s*(?:音楽|拍手|笑い?|歓声|効果音|BGM|music|applause|laughter|laughs|laughing|laugh|sounds?|sound effects?|cheering|cheers|silence|inaudible|no audio)\s*[\])）】］]",
    )
    .expect("valid sound marker regex")
});

/// Musical note glyph runs.
static RE_MUSIC_NOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[♪♫♬♩🎵🎶]+").expect("valid music note regex"));

/// Leading `>>` speaker-turn marker.
static RE_SPEAKER_TURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>>\s*").expect("valid speaker turn regex"));

static DEFAULT_NORMALIZER: LazyLock<TextNormalizer> = LazyLock::new(TextNormalizer::default);

/// Normalize text with the default rule set.
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

/// Script- or locale-specific normalization plugged into [`TextNormalizer`].
pub trait ScriptRules: Send + Sync {
    /// Map characters of this script to their canonical form.
    fn map_script(&self, text: &str) -> String;

    /// Punctuation of this script that should not keep a cue alive on its own.
    fn is_punctuation(&self, c: char) -> bool;
}

/// Caption text normalizer.
///
/// Steps, in order:
/// 1. Decode entities (zero-width references decode to nothing)
/// 2. Strip timing and markup tags
/// 3. Remove sound markers and music note glyphs
/// 4. Strip a leading `>>` speaker turn
/// 5. Collapse runs of 4+ identical characters
/// 6. Apply script rules
/// 7. Empty out text made only of punctuation, digits and whitespace
/// 8. Collapse whitespace and trim
pub struct TextNormalizer {
    rules: Vec<Box<dyn ScriptRules>>,
}

impl TextNormalizer {
    /// Create a normalizer with the given script rules.
    pub fn new(rules: Vec<Box<dyn ScriptRules>>) -> Self {
        Self { rules }
    }

    /// Create a normalizer without any script rules.
    pub fn plain() -> Self {
        Self::new(Vec::new())
    }

    /// Add another script rule set.
    pub fn with_rules(mut self, rules: impl ScriptRules + 'static) -> Self {
        self.rules.push(Box::new(rules));
        self
    }

    /// Normalize text. The result is stable under repeated normalization.
    ///
    /// Each pass peels one level of entity escaping, so passes repeat until
    /// the text stops changing. No step makes the text longer in bytes, and
    /// the steps that keep the length are themselves idempotent.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.normalize_pass(text);
        loop {
            let next = self.normalize_pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn normalize_pass(&self, text: &str) -> String {
        let text = strip_zero_width(&decode_entities(text));
        let text = RE_TAG.replace_all(&text, "");
        let text = RE_SOUND_MARKER.replace_all(&text, " ");
        let text = RE_MUSIC_NOTES.replace_all(&text, " ");
        let text = RE_SPEAKER_TURN.replace(&text, "");
        let mut text = collapse_char_runs(&text, CHAR_RUN_COLLAPSE);

        for rules in &self.rules {
            text = rules.map_script(&text);
        }

        if self.is_filler(&text) {
            return String::new();
        }

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Only punctuation, digits and whitespace.
    fn is_filler(&self, text: &str) -> bool {
        text.chars().all(|c| {
            c.is_whitespace()
                || c.is_ascii_punctuation()
                || c.is_ascii_digit()
                || self.rules.iter().any(|r| r.is_punctuation(c))
        })
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::plain().with_rules(JapaneseRules)
    }
}

/// Japanese caption rules: half-width katakana to full width, and Japanese
/// punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseRules;

/// Full-width forms of U+FF61..=U+FF9F, in code point order.
const FULL_WIDTH_KANA: [char; 63] = [
    '。', '「', '」', '、', '・', 'ヲ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ッ', 'ー',
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ン', '゛', '゜',
];

const HALF_WIDTH_START: u32 = 0xFF61;
const HALF_WIDTH_VOICED: char = '\u{FF9E}';
const HALF_WIDTH_SEMI_VOICED: char = '\u{FF9F}';

const JAPANESE_PUNCTUATION: &str = "。、・「」『』！？ー〜～…‥（）【】［］｛｝〈〉《》：；，．＂＇";

impl JapaneseRules {
    fn to_full_width(c: char) -> Option<char> {
        let offset = (c as u32).checked_sub(HALF_WIDTH_START)? as usize;
        FULL_WIDTH_KANA.get(offset).copied()
    }

    /// `カ` + `ﾞ` -> `ガ`
    fn voiced(base: char) -> Option<char> {
        if base == 'ウ' {
            return Some('ヴ');
        }
        let takes_mark = "カキクケコサシスセソタチツテトハヒフヘホ".contains(base);
        takes_mark.then(|| char::from_u32(base as u32 + 1)).flatten()
    }

    /// `ハ` + `ﾟ` -> `パ`
    fn semi_voiced(base: char) -> Option<char> {
        let takes_mark = "ハヒフヘホ".contains(base);
        takes_mark.then(|| char::from_u32(base as u32 + 2)).flatten()
    }
}

impl ScriptRules for JapaneseRules {
    fn map_script(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            let Some(full) = Self::to_full_width(c) else {
                result.push(c);
                continue;
            };

            let combined = match chars.peek() {
                Some(&HALF_WIDTH_VOICED) => Self::voiced(full),
                Some(&HALF_WIDTH_SEMI_VOICED) => Self::semi_voiced(full),
                _ => None,
            };
            match combined {
                Some(composed) => {
                    chars.next();
                    result.push(composed);
                }
                None => result.push(full),
            }
        }
        result
    }

    fn is_punctuation(&self, c: char) -> bool {
        c == '\u{3000}' || JAPANESE_PUNCTUATION.contains(c)
    }
}

/// Normalizes the text of every cue and drops cues whose text ends up empty.
pub struct NormalizeText<'a> {
    normalizer: &'a TextNormalizer,
    dropped_count: usize,
}

impl<'a> NormalizeText<'a> {
    pub fn new(normalizer: &'a TextNormalizer) -> Self {
        Self {
            normalizer,
            dropped_count: 0,
        }
    }

    /// Number of cues dropped because nothing was left after cleaning.
    pub fn dropped_count(&self) -> usize {
        self.dropped_count
    }
}

impl Transform for NormalizeText<'_> {
    fn transform(&mut self, cues: &mut Vec<Cue>) {
        let before = cues.len();
        cues.retain_mut(|cue| {
            cue.text = self.normalizer.normalize(&cue.text);
            !cue.text.is_empty()
        });
        self.dropped_count += before - cues.len();
    }
}
