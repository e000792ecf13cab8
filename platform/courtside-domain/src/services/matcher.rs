use crate::value_objects::post::{MatchedPost, Post};
use chrono::NaiveDate;

/// Matching options. `max_delta_days` is unbounded by default: sparse or
/// front-loaded post histories still get attributed to a game rather than
/// discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchConfig {
    pub max_delta_days: Option<f64>,
}

#[derive(Debug, Default)]
pub struct MatchOutcome {
    pub matched: Vec<MatchedPost>,
    pub beyond_tolerance: usize,
}

/// Assign every post to its nearest game date by absolute day distance.
/// An exact tie prefers the earlier game. `game_dates` must be sorted
/// ascending; each post is resolved with a binary search.
pub fn snap_posts(
    game_dates: &[NaiveDate],
    posts: &[Post],
    config: &MatchConfig,
) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    if game_dates.is_empty() {
        return outcome;
    }

    outcome.matched.reserve(posts.len());
    for post in posts {
        let (game_date, delta_days) = nearest_date(game_dates, post.post_date);
        if let Some(limit) = config.max_delta_days {
            if delta_days > limit {
                outcome.beyond_tolerance += 1;
                continue;
            }
        }
        outcome.matched.push(MatchedPost {
            post: post.clone(),
            game_date,
            delta_days,
        });
    }
    outcome
}

fn nearest_date(sorted: &[NaiveDate], target: NaiveDate) -> (NaiveDate, f64) {
    let idx = sorted.partition_point(|date| *date < target);

    let after = sorted.get(idx).copied();
    let before = if idx > 0 {
        Some(sorted[idx - 1])
    } else {
        None
    };

    let chosen = match (before, after) {
        (Some(before), Some(after)) => {
            let dist_before = distance_days(target, before);
            let dist_after = distance_days(target, after);
            // tie goes to the earlier game date
            if dist_before <= dist_after {
                before
            } else {
                after
            }
        }
        (Some(before), None) => before,
        (None, Some(after)) => after,
        (None, None) => unreachable!("caller guards against an empty catalog"),
    };

    (chosen, distance_days(target, chosen))
}

fn distance_days(a: NaiveDate, b: NaiveDate) -> f64 {
    (a - b).num_days().abs() as f64
}
