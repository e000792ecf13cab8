use crate::value_objects::final_row::FinalRow;
use crate::value_objects::game::GameCatalog;
use crate::value_objects::game_sentiment::GameSentiment;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Left-join the full catalog against the per-game aggregates. Every game
/// yields exactly one row, in catalog order. Games with no matched posts
/// fill sentiment fields and `post_count` with zero and leave the delta
/// fields `None`.
pub fn merge_with_catalog(catalog: &GameCatalog, aggregates: &[GameSentiment]) -> Vec<FinalRow> {
    let by_date: BTreeMap<NaiveDate, &GameSentiment> = aggregates
        .iter()
        .map(|agg| (agg.game_date, agg))
        .collect();

    catalog
        .events
        .iter()
        .map(|event| match by_date.get(&event.date) {
            Some(agg) => FinalRow {
                date: event.date,
                cells: event.cells.clone(),
                mean_sentiment: agg.mean_sentiment,
                min_sentiment: agg.min_sentiment,
                max_sentiment: agg.max_sentiment,
                pos_share: agg.pos_share,
                neg_share: agg.neg_share,
                post_count: agg.post_count,
                avg_delta_days: Some(agg.avg_delta_days),
                min_delta_days: Some(agg.min_delta_days),
                max_delta_days: Some(agg.max_delta_days),
                has_sentiment_data: agg.post_count > 0,
            },
            None => FinalRow {
                date: event.date,
                cells: event.cells.clone(),
                mean_sentiment: 0.0,
                min_sentiment: 0.0,
                max_sentiment: 0.0,
                pos_share: 0.0,
                neg_share: 0.0,
                post_count: 0,
                avg_delta_days: None,
                min_delta_days: None,
                max_delta_days: None,
                has_sentiment_data: false,
            },
        })
        .collect()
}
