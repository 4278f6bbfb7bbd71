//! Applying the classifier across a comment forest.

use rayon::prelude::*;
use serde::Serialize;

use super::classifier::classify_with_thresholds;
use super::options::{FilterOptions, FilterThresholds};
use super::{Comment, CommentBatch};

/// Counts over the top-level comments of one filtering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub total: usize,
    pub filtered: usize,
    pub kept: usize,
    /// Percentage filtered with one decimal, or `"0"` for an empty input
    pub filter_rate: String,
}

impl FilterStats {
    /// Derive stats from before and after counts.
    pub fn from_counts(total: usize, kept: usize) -> Self {
        let filtered = total.saturating_sub(kept);
        let filter_rate = if total == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", filtered as f64 * 100.0 / total as f64)
        };
        Self {
            total,
            filtered,
            kept,
            filter_rate,
        }
    }
}

/// Remove filtered comments from a forest.
///
/// Top-level comments are classified in parallel; every kept comment then has
/// its replies filtered on their own. A filtered reply never takes its
/// parent with it, and replies of a filtered parent are dropped with it.
pub fn filter_forest(
    comments: Vec<Comment>,
    options: &FilterOptions,
    video_author_channel_id: &str,
    thresholds: &FilterThresholds,
) -> Vec<Comment> {
    if !options.enable_filtering {
        return comments;
    }

    comments
        .into_par_iter()
        .filter_map(|mut comment| {
            if let Some(reason) =
                classify_with_thresholds(&comment, options, video_author_channel_id, thresholds)
            {
                tracing::trace!(id = %comment.id, %reason, "filtered comment");
                return None;
            }
            let replies = std::mem::take(&mut comment.replies);
            comment.replies = replies
                .into_iter()
                .filter(|reply| {
                    classify_with_thresholds(reply, options, video_author_channel_id, thresholds)
                        .is_none()
                })
                .collect();
            Some(comment)
        })
        .collect()
}

/// Stats for filtering `comments` with the given settings.
///
/// Only top-level comments are counted.
pub fn filter_stats(
    comments: &[Comment],
    options: &FilterOptions,
    video_author_channel_id: &str,
    thresholds: &FilterThresholds,
) -> FilterStats {
    let kept = if options.enable_filtering {
        comments
            .par_iter()
            .filter(|comment| {
                classify_with_thresholds(comment, options, video_author_channel_id, thresholds)
                    .is_none()
            })
            .count()
    } else {
        comments.len()
    };
    FilterStats::from_counts(comments.len(), kept)
}

/// Output of [`CommentFilter::apply`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredComments {
    pub comments: Vec<Comment>,
    pub stats: FilterStats,
    /// True when the source announced more pages
    pub has_more: bool,
}

/// Filter settings bound to one video.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    options: FilterOptions,
    thresholds: FilterThresholds,
    video_author_channel_id: String,
}

impl CommentFilter {
    pub fn new(options: FilterOptions, video_author_channel_id: impl Into<String>) -> Self {
        Self {
            options,
            thresholds: FilterThresholds::default(),
            video_author_channel_id: video_author_channel_id.into(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: FilterThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Filter a batch and report what was removed.
    pub fn apply(&self, batch: CommentBatch) -> FilteredComments {
        let total = batch.comments.len();
        let comments = filter_forest(
            batch.comments,
            &self.options,
            &self.video_author_channel_id,
            &self.thresholds,
        );
        let stats = FilterStats::from_counts(total, comments.len());

        tracing::debug!(
            total = stats.total,
            filtered = stats.filtered,
            rate = %stats.filter_rate,
            "filtered comments"
        );

        FilteredComments {
            comments,
            stats,
            has_more: batch.has_more,
        }
    }
}
