use crate::config::Config;
use crate::pipeline::{process_player, PipelinePorts, PlayerOutcome};
use courtside_domain::repositories::player_ids::PlayerIdCache;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Process every player independently. A player that fails or skips never
/// stops the rest of the batch.
pub fn run_batch(
    slugs: &[String],
    config: &Config,
    ports: &PipelinePorts<'_>,
    ids: &PlayerIdCache,
) -> BatchReport {
    let mut report = BatchReport::default();

    for slug in slugs {
        report.processed += 1;
        let player_id = ids.get(slug);
        match process_player(slug, player_id, config, ports) {
            Ok(PlayerOutcome::Completed(summary)) => {
                report.succeeded += 1;
                tracing::info!(
                    slug = %summary.slug,
                    rows = summary.rows_written,
                    games_with_sentiment = summary.games_with_sentiment,
                    "player done"
                );
            }
            Ok(PlayerOutcome::SkippedNoGameLogs) => {
                report.skipped += 1;
                tracing::warn!(slug = %slug, "skipped: no game logs");
            }
            Ok(PlayerOutcome::SkippedNoPosts) => {
                report.skipped += 1;
                tracing::warn!(slug = %slug, "skipped: no posts");
            }
            Err(err) => {
                report.failed += 1;
                tracing::error!(slug = %slug, error = %err, "player pipeline failed");
            }
        }
    }

    report
}
