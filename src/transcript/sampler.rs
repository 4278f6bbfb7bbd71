//! Budgeted sampling of long segment lists.
//!
//! A two-hour video produces thousands of segments; callers usually want a
//! few hundred. [`sample`] picks a subset that keeps the original order and
//! leans toward the parts of the timeline the chosen [`SamplingMode`] values:
//! the opening, an even spread through the middle, and the conclusion.

use super::SamplingMode;

/// Output of [`sample`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<T> {
    pub items: Vec<T>,
    pub is_truncated: bool,
    pub message: Option<String>,
}

/// Which indices of the input survive sampling.
struct Plan {
    intro: usize,
    middle: Vec<usize>,
    conclusion_start: usize,
}

impl Plan {
    fn conclusion_len(&self, total: usize) -> usize {
        total - self.conclusion_start
    }

    fn keep_mask(&self, total: usize) -> Vec<bool> {
        let mut keep = vec![false; total];
        for slot in keep.iter_mut().take(self.intro) {
            *slot = true;
        }
        for &idx in &self.middle {
            keep[idx] = true;
        }
        for slot in keep.iter_mut().skip(self.conclusion_start) {
            *slot = true;
        }
        keep
    }
}

/// Select at most `max_items` items according to `mode`.
///
/// Lists that already fit are returned unchanged and not marked truncated.
pub fn sample<T>(items: Vec<T>, mode: SamplingMode, max_items: usize) -> Sample<T> {
    let total = items.len();
    if total <= max_items {
        return Sample {
            items,
            is_truncated: false,
            message: None,
        };
    }

    if mode == SamplingMode::Full {
        let items: Vec<T> = items.into_iter().take(max_items).collect();
        let message = format!(
            "Showing the first {} of {} segments (full mode)",
            items.len(),
            total
        );
        return Sample {
            items,
            is_truncated: true,
            message: Some(message),
        };
    }

    let plan = match mode {
        SamplingMode::Summary => plan_summary(total, max_items),
        _ => plan_smart(total, max_items),
    };

    let keep = plan.keep_mask(total);
    let items: Vec<T> = items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, kept)| kept.then_some(item))
        .collect();

    let message = format!(
        "Sampled {} of {} segments ({} mode: {} intro, {} middle, {} conclusion)",
        items.len(),
        total,
        mode,
        plan.intro,
        plan.middle.len(),
        plan.conclusion_len(total)
    );
    tracing::debug!(total, kept = items.len(), %mode, "sampled transcript segments");

    Sample {
        items,
        is_truncated: true,
        message: Some(message),
    }
}

/// 20% intro, 30% middle sampled with a fractional stride, rest conclusion.
fn plan_smart(total: usize, budget: usize) -> Plan {
    let intro = budget * 2 / 10;
    let middle_count = budget * 3 / 10;
    let conclusion = budget - intro - middle_count;
    let conclusion_start = total.saturating_sub(conclusion).max(intro);

    let mut middle = Vec::with_capacity(middle_count);
    if middle_count > 0 {
        let range = (conclusion_start - intro) as f64;
        let step = range / middle_count as f64;
        for i in 0..middle_count {
            let idx = (intro as f64 + i as f64 * step).floor() as usize;
            if idx >= intro && idx < conclusion_start {
                middle.push(idx);
            }
        }
    }

    Plan {
        intro,
        middle,
        conclusion_start,
    }
}

/// 10% intro, 70% conclusion, the remainder sampled with an integer stride.
fn plan_summary(total: usize, budget: usize) -> Plan {
    let intro = budget / 10;
    let conclusion = budget * 7 / 10;
    let middle_count = budget - intro - conclusion;
    let conclusion_start = total.saturating_sub(conclusion).max(intro);

    let mut middle = Vec::with_capacity(middle_count);
    if middle_count > 0 {
        let stride = ((total - conclusion) / middle_count).max(1);
        let mut idx = intro;
        while middle.len() < middle_count && idx < conclusion_start {
            middle.push(idx);
            idx += stride;
        }
    }

    Plan {
        intro,
        middle,
        conclusion_start,
    }
}
