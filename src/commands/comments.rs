//! Comments command handler

use std::path::Path;

use anyhow::{Context, Result};

use tubesift::{Comment, CommentBatch, CommentFilter, FilterOptions, FilteredComments};

use super::{load_config, read_input};

/// Command line adjustments on top of the configured filter.
#[derive(Debug, Default)]
pub struct Overrides {
    pub author_channel_id: String,
    pub no_filter: bool,
    pub keep_spam: bool,
    pub keep_noise: bool,
    pub keep_unrelated: bool,
}

impl Overrides {
    /// Apply to options loaded from config. Flags can only relax filtering.
    pub fn apply(&self, mut options: FilterOptions) -> FilterOptions {
        if self.no_filter {
            options.enable_filtering = false;
        }
        if self.keep_spam {
            options.remove_spam = false;
        }
        if self.keep_noise {
            options.remove_noise = false;
        }
        if self.keep_unrelated {
            options.remove_unrelated = false;
        }
        options
    }
}

/// Filter a comment dump and print what survives.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    file: &Path,
    overrides: Overrides,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let filter_config = load_config(config_path)?.filter;
    let options = overrides.apply(filter_config.options());

    let content = read_input(file)?;
    let batch = CommentBatch::from_json(&content)
        .with_context(|| format!("Failed to decode comments in {}", file.display()))?;
    tracing::info!(file = %file.display(), comments = batch.comments.len(), "filtering comments");

    let result = CommentFilter::new(options, overrides.author_channel_id)
        .with_thresholds(filter_config.thresholds)
        .apply(batch);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_text(&result));
    }
    Ok(())
}

fn render_comment(out: &mut String, comment: &Comment, indent: &str) {
    out.push_str(&format!(
        "{}{} ({} likes): {}\n",
        indent,
        comment.author,
        comment.likes,
        comment.text.replace('\n', " ")
    ));
}

/// Plain text rendering: kept threads, then a stats line.
pub fn render_text(result: &FilteredComments) -> String {
    let mut out = String::new();
    for comment in &result.comments {
        render_comment(&mut out, comment, "");
        for reply in &comment.replies {
            render_comment(&mut out, reply, "    ");
        }
    }
    if !result.comments.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!(
        "Kept {} of {} comments ({}% filtered)\n",
        result.stats.kept, result.stats.total, result.stats.filter_rate
    ));
    if result.has_more {
        out.push_str("More comments are available upstream\n");
    }
    out
}
