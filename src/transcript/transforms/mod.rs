//! Cue-level cleaning transforms.
//!
//! Each transform mutates the cue list in place, in the order the extractor
//! chains them:
//!
//! 1. [`NormalizeText`] - clean each cue's text and drop cues left empty
//! 2. [`CollapseDuplicates`] - remove repeated and progressive duplicates

mod dedupe;
mod normalize;

use crate::caption::Cue;

pub use dedupe::{is_progressive_extension, CollapseDuplicates, MIN_CUE_DURATION};
pub use normalize::{normalize, JapaneseRules, NormalizeText, ScriptRules, TextNormalizer};

/// A pass over the cue list of one caption track.
pub trait Transform {
    fn transform(&mut self, cues: &mut Vec<Cue>);
}
