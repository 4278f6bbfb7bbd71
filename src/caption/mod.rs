//! Caption track parsing.
//!
//! Reads SubRip (`.srt`) and WebVTT (`.vtt`) caption tracks into an ordered
//! list of raw [`Cue`]s. Parsing is lenient: a cue with an unparsable timing
//! line is skipped and the rest of the track is still read. Text is left
//! untouched apart from joining the lines of a cue with a single space;
//! cleaning happens later in the transcript pipeline.

mod srt;
mod vtt;

/// One timed unit of caption markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Cue text, lines joined with a single space
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Cue {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Length of the cue in seconds (negative for reversed timings).
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Supported caption dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// Numbered cue blocks with `HH:MM:SS,mmm` timings
    SubRip,
    /// `WEBVTT` tracks with `HH:MM:SS.mmm` timings and optional metadata blocks
    WebVtt,
}

impl CaptionFormat {
    /// Guess the dialect of a caption track from its content.
    pub fn detect(content: &str) -> Self {
        let content = content.trim_start_matches('\u{feff}');
        if content.trim_start().starts_with("WEBVTT") {
            return CaptionFormat::WebVtt;
        }

        for line in content.lines() {
            if let Some((start, _)) = line.split_once("-->") {
                if start.contains(',') {
                    return CaptionFormat::SubRip;
                }
                if start.contains('.') {
                    return CaptionFormat::WebVtt;
                }
            }
        }

        CaptionFormat::SubRip
    }

    pub fn name(&self) -> &'static str {
        match self {
            CaptionFormat::SubRip => "srt",
            CaptionFormat::WebVtt => "vtt",
        }
    }
}

/// Parse a caption track, detecting its dialect.
pub fn parse_captions(content: &str) -> Vec<Cue> {
    parse_with_format(content, CaptionFormat::detect(content))
}

/// Parse a caption track using an explicit dialect.
pub fn parse_with_format(content: &str, format: CaptionFormat) -> Vec<Cue> {
    let content = content.trim_start_matches('\u{feff}');
    let cues = match format {
        CaptionFormat::SubRip => srt::parse(content),
        CaptionFormat::WebVtt => vtt::parse(content),
    };
    tracing::trace!(format = format.name(), cues = cues.len(), "parsed caption track");
    cues
}

/// Split content into lines, accepting `\n`, `\r\n` and bare `\r` endings.
pub(crate) fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Returns true if a line looks like a cue timing line.
pub(crate) fn is_timing_line(line: &str) -> bool {
    line.contains("-->")
}

/// Returns true if the text before `-->` is a valid timestamp.
///
/// Inside a cue, an arrow line failing this check is caption text.
pub(crate) fn starts_with_timestamp(line: &str) -> bool {
    line.split_once("-->")
        .is_some_and(|(start, _)| parse_timestamp(start).is_some())
}

/// Parse a `start --> end [settings]` line into seconds.
///
/// Cue settings after the end timestamp (`position:10%`, `align:start`, ...)
/// are ignored.
pub(crate) fn parse_timing_line(line: &str) -> Option<(f64, f64)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split_whitespace().next()?;
    Some((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// Parse `H:MM:SS`, `H:MM:SS.mmm`, `H:MM:SS,mmm` or `MM:SS.mmm` into seconds.
pub fn parse_timestamp(value: &str) -> Option<f64> {
    let value = value.trim();
    let (clock, fraction) = match value.find(['.', ',']) {
        Some(idx) => (&value[..idx], Some(&value[idx + 1..])),
        None => (value, None),
    };

    let fields: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (parse_field(h)?, parse_field(m)?, parse_field(s)?),
        [m, s] => (0, parse_field(m)?, parse_field(s)?),
        _ => return None,
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let fraction = match fraction {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            format!("0.{}", digits).parse::<f64>().ok()?
        }
        Some(_) => return None,
        None => 0.0,
    };

    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)?;
    Some(total as f64 + fraction)
}

fn parse_field(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
