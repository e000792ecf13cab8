use chrono::NaiveDate;

/// Per-game sentiment aggregate. Emitted only for game dates with at least
/// one matched post. Shares use strict comparison: a score of exactly zero
/// counts toward neither `pos_share` nor `neg_share` but does count toward
/// `post_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSentiment {
    pub game_date: NaiveDate,
    pub mean_sentiment: f64,
    pub min_sentiment: f64,
    pub max_sentiment: f64,
    pub pos_share: f64,
    pub neg_share: f64,
    pub post_count: usize,
    pub avg_delta_days: f64,
    pub min_delta_days: f64,
    pub max_delta_days: f64,
}
