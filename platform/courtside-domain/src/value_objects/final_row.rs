use chrono::NaiveDate;

/// One output row per game, whether or not any post matched it. Sentiment
/// fields and `post_count` fill with zero when nothing matched; the delta
/// fields stay `None` so "no posts" never reads as "zero gap".
#[derive(Debug, Clone, PartialEq)]
pub struct FinalRow {
    pub date: NaiveDate,
    pub cells: Vec<String>,
    pub mean_sentiment: f64,
    pub min_sentiment: f64,
    pub max_sentiment: f64,
    pub pos_share: f64,
    pub neg_share: f64,
    pub post_count: usize,
    pub avg_delta_days: Option<f64>,
    pub min_delta_days: Option<f64>,
    pub max_delta_days: Option<f64>,
    pub has_sentiment_data: bool,
}
