use chrono::{DateTime, NaiveDate, Utc};

/// One Reddit post with its averaged compound sentiment. `post_date` is
/// `created_utc` floored to day granularity; matching runs on `post_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub created_utc: DateTime<Utc>,
    pub post_date: NaiveDate,
    pub compound_avg: f64,
}

impl Post {
    pub fn new(id: String, created_utc: DateTime<Utc>, compound_avg: f64) -> Self {
        Self {
            id,
            post_date: created_utc.date_naive(),
            created_utc,
            compound_avg,
        }
    }
}

/// A post snapped to its nearest game date. `delta_days` is the absolute
/// gap in days between `post.post_date` and `game_date`, never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPost {
    pub post: Post,
    pub game_date: NaiveDate,
    pub delta_days: f64,
}

#[derive(Debug, Default)]
pub struct PostReport {
    pub rows_read: usize,
    pub invalid_timestamps: usize,
    pub invalid_scores: usize,
    pub all_scores_missing: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Sub-score columns resolved from the source header.
    pub schema: Vec<String>,
}
