//! Viewer comment filtering.
//!
//! Comments arrive as a forest: top-level comments, each with at most one
//! level of replies. The [`classifier`] decides per comment whether it is
//! spam, noise or off-topic bot chatter; [`filter`] applies it across the
//! forest and reports statistics.

pub mod classifier;
pub mod filter;
pub mod options;

use serde::{Deserialize, Serialize};

pub use classifier::{classify, classify_with_thresholds, should_filter, FilterReason};
pub use filter::{filter_forest, filter_stats, CommentFilter, FilterStats, FilteredComments};
pub use options::{FilterOptions, FilterThresholds};

/// A viewer comment or reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawComment")]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
    pub author_channel_id: String,
    pub likes: u64,
    pub published_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Replies; always empty on a reply
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Create a comment without replies.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        author: impl Into<String>,
        author_channel_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author: author.into(),
            author_channel_id: author_channel_id.into(),
            likes: 0,
            published_at: String::new(),
            updated_at: None,
            replies: Vec::new(),
        }
    }

    pub fn with_likes(mut self, likes: u64) -> Self {
        self.likes = likes;
        self
    }

    /// Attach replies. Replies of replies are lifted to this level so the
    /// forest stays one level deep.
    pub fn with_replies(mut self, replies: Vec<Comment>) -> Self {
        self.replies = flatten_replies(replies);
        self
    }

    /// Number of comments in this thread, including the top-level comment.
    pub fn thread_len(&self) -> usize {
        1 + self.replies.len()
    }
}

fn flatten_replies(replies: Vec<Comment>) -> Vec<Comment> {
    let mut flat = Vec::with_capacity(replies.len());
    for mut reply in replies {
        let nested = std::mem::take(&mut reply.replies);
        flat.push(reply);
        flat.extend(flatten_replies(nested));
    }
    flat
}

/// Wire shape of a comment, before depth is enforced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComment {
    #[serde(default)]
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    author_channel_id: String,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    replies: Vec<Comment>,
}

impl From<RawComment> for Comment {
    fn from(raw: RawComment) -> Self {
        Comment {
            id: raw.id,
            text: raw.text,
            author: raw.author,
            author_channel_id: raw.author_channel_id,
            likes: raw.likes,
            published_at: raw.published_at,
            updated_at: raw.updated_at,
            replies: Vec::new(),
        }
        .with_replies(raw.replies)
    }
}

/// One page of comment threads as delivered upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// A flat collection of comment threads accumulated from one or more pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentBatch {
    pub comments: Vec<Comment>,
    /// True when the last page announced more pages upstream
    pub has_more: bool,
}

impl CommentBatch {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            has_more: false,
        }
    }

    /// Concatenate pages in order.
    pub fn from_pages(pages: impl IntoIterator<Item = CommentPage>) -> Self {
        let mut batch = Self::default();
        for page in pages {
            batch.comments.extend(page.comments);
            batch.has_more = page.next_page_token.is_some();
        }
        batch
    }

    /// Decode either a JSON array of comments, a single page object, or an
    /// array of pages.
    pub fn from_json(input: &str) -> crate::Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Input {
            Pages(Vec<CommentPage>),
            Comments(Vec<Comment>),
            Page(CommentPage),
        }

        let input: Input = serde_json::from_str(input)?;
        Ok(match input {
            Input::Comments(comments) => Self::new(comments),
            Input::Page(page) => Self::from_pages([page]),
            Input::Pages(pages) => Self::from_pages(pages),
        })
    }
}
