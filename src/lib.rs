//! tubesift - clean, sample and filter caption tracks and viewer comments
//!
//! Two independent pipelines:
//!
//! - captions (SRT or WebVTT) are parsed, normalized, deduplicated and
//!   sampled down to a segment budget by [`TranscriptExtractor`]
//! - comment forests are classified and filtered by [`CommentFilter`]
//!
//! Everything here is synchronous and pure apart from [`Config`] loading.

pub mod caption;
pub mod comments;
pub mod config;
pub mod error;
pub mod text;
pub mod transcript;

pub use caption::{parse_captions, CaptionFormat, Cue};
pub use comments::{
    Comment, CommentBatch, CommentFilter, CommentPage, FilterOptions, FilterReason, FilterStats,
    FilterThresholds, FilteredComments,
};
pub use config::{Config, FilterConfig};
pub use error::{Error, Result};
pub use transcript::transforms::normalize;
pub use transcript::{
    SamplingMode, Segment, TranscriptConfig, TranscriptExtractor, TranscriptResult,
};
