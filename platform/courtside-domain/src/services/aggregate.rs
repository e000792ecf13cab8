use crate::value_objects::game_sentiment::GameSentiment;
use crate::value_objects::post::MatchedPost;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug)]
struct GroupAcc {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
    positive: usize,
    negative: usize,
    delta_sum: f64,
    delta_min: f64,
    delta_max: f64,
}

impl GroupAcc {
    fn new(score: f64, delta: f64) -> Self {
        Self {
            count: 1,
            sum: score,
            min: score,
            max: score,
            positive: usize::from(score > 0.0),
            negative: usize::from(score < 0.0),
            delta_sum: delta,
            delta_min: delta,
            delta_max: delta,
        }
    }

    fn push(&mut self, score: f64, delta: f64) {
        self.count += 1;
        self.sum += score;
        self.min = self.min.min(score);
        self.max = self.max.max(score);
        if score > 0.0 {
            self.positive += 1;
        } else if score < 0.0 {
            self.negative += 1;
        }
        self.delta_sum += delta;
        self.delta_min = self.delta_min.min(delta);
        self.delta_max = self.delta_max.max(delta);
    }
}

/// Group matched posts by assigned game date and compute the per-game
/// sentiment statistics. Only dates with at least one post are emitted;
/// output is sorted ascending by game date.
pub fn aggregate_by_game(matched: &[MatchedPost]) -> Vec<GameSentiment> {
    let mut groups: BTreeMap<NaiveDate, GroupAcc> = BTreeMap::new();

    for m in matched {
        let score = m.post.compound_avg;
        groups
            .entry(m.game_date)
            .and_modify(|acc| acc.push(score, m.delta_days))
            .or_insert_with(|| GroupAcc::new(score, m.delta_days));
    }

    groups
        .into_iter()
        .map(|(game_date, acc)| {
            let count = acc.count as f64;
            GameSentiment {
                game_date,
                mean_sentiment: acc.sum / count,
                min_sentiment: acc.min,
                max_sentiment: acc.max,
                pos_share: acc.positive as f64 / count,
                neg_share: acc.negative as f64 / count,
                post_count: acc.count,
                avg_delta_days: acc.delta_sum / count,
                min_delta_days: acc.delta_min,
                max_delta_days: acc.delta_max,
            }
        })
        .collect()
}
