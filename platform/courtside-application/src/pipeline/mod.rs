use crate::config::{Config, EmptyPostsPolicy};
use courtside_domain::repositories::final_table::FinalTableWriter;
use courtside_domain::repositories::game_log::{GameLogQuery, GameLogRepository};
use courtside_domain::repositories::posts::{PostQuery, PostRepository};
use courtside_domain::services::aggregate::aggregate_by_game;
use courtside_domain::services::dedup::dedup_posts;
use courtside_domain::services::matcher::{snap_posts, MatchConfig};
use courtside_domain::services::merge::merge_with_catalog;
use courtside_domain::value_objects::post::PostReport;
use serde::Serialize;
use std::path::PathBuf;

/// The ports one player's pipeline runs against.
pub struct PipelinePorts<'a> {
    pub game_logs: &'a dyn GameLogRepository,
    pub posts: &'a dyn PostRepository,
    pub writer: &'a dyn FinalTableWriter,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub slug: String,
    pub player_id: Option<u64>,
    pub seasons: Vec<i32>,
    pub partitions_found: usize,
    pub partitions_missing: usize,
    pub games: usize,
    pub posts_loaded: usize,
    pub invalid_timestamps: usize,
    pub all_scores_missing: usize,
    pub duplicates_removed: usize,
    pub beyond_tolerance: usize,
    pub games_with_sentiment: usize,
    pub rows_written: usize,
    pub first_game: Option<String>,
    pub last_game: Option<String>,
    pub output_path: String,
}

/// Per-player result. Skips are valid outcomes, not errors: the batch
/// keeps going either way, and nothing is written for a skipped player.
#[derive(Debug)]
pub enum PlayerOutcome {
    Completed(PlayerSummary),
    SkippedNoGameLogs,
    SkippedNoPosts,
}

/// Run the full align-and-aggregate pipeline for one player: load the
/// game catalog and posts, dedup, snap posts to nearest games, aggregate
/// per game, left-join onto the catalog, write the table and summary.
pub fn process_player(
    slug: &str,
    player_id: Option<u64>,
    config: &Config,
    ports: &PipelinePorts<'_>,
) -> Result<PlayerOutcome, String> {
    let query = GameLogQuery {
        slug: slug.to_string(),
        seasons: config.run.seasons.clone(),
    };
    let Some((catalog, catalog_report)) = ports.game_logs.load_catalog(&query)? else {
        tracing::warn!(slug, "no gamelog partitions found, skipping player");
        return Ok(PlayerOutcome::SkippedNoGameLogs);
    };
    if catalog.is_empty() {
        tracing::warn!(slug, "gamelog catalog is empty, skipping player");
        return Ok(PlayerOutcome::SkippedNoGameLogs);
    }
    tracing::info!(
        slug,
        games = catalog.events.len(),
        partitions_found = catalog_report.partitions_found,
        partitions_missing = catalog_report.partitions_missing,
        "loaded game catalog"
    );

    let loaded = ports.posts.load_posts(&PostQuery {
        slug: slug.to_string(),
    })?;
    let (posts, post_report) = match loaded {
        Some(loaded) => loaded,
        None => {
            if config.empty_posts_policy() == EmptyPostsPolicy::Skip {
                tracing::warn!(slug, "no sentiment source found, skipping player");
                return Ok(PlayerOutcome::SkippedNoPosts);
            }
            tracing::warn!(slug, "no sentiment source found, emitting empty-fill table");
            (Vec::new(), PostReport::default())
        }
    };
    tracing::info!(
        slug,
        posts = posts.len(),
        rows_read = post_report.rows_read,
        invalid_timestamps = post_report.invalid_timestamps,
        all_scores_missing = post_report.all_scores_missing,
        "loaded sentiment posts"
    );

    let dedup = dedup_posts(posts, config.dedup_strategy())?;
    if dedup.removed > 0 {
        tracing::info!(slug, removed = dedup.removed, "removed duplicate post ids");
    }
    let mut posts = dedup.posts;
    posts.sort_by_key(|post| post.post_date);

    if posts.is_empty() && config.empty_posts_policy() == EmptyPostsPolicy::Skip {
        tracing::warn!(slug, "no usable posts after cleaning, skipping player");
        return Ok(PlayerOutcome::SkippedNoPosts);
    }

    let match_config = MatchConfig {
        max_delta_days: config.max_delta_days(),
    };
    let match_outcome = snap_posts(&catalog.dates(), &posts, &match_config);
    if match_outcome.beyond_tolerance > 0 {
        tracing::info!(
            slug,
            beyond_tolerance = match_outcome.beyond_tolerance,
            "dropped posts beyond the matching tolerance"
        );
    }

    let aggregates = aggregate_by_game(&match_outcome.matched);
    let rows = merge_with_catalog(&catalog, &aggregates);
    let games_with_sentiment = rows.iter().filter(|row| row.has_sentiment_data).count();

    let out_dir = PathBuf::from(&config.paths.out_dir);
    ports.writer.ensure_dir(&out_dir)?;

    let first_season = config.run.seasons.first().copied().unwrap_or_default();
    let last_season = config.run.seasons.last().copied().unwrap_or_default();
    let table_path = out_dir.join(format!(
        "{slug}_stats_sentiment_{first_season}_{last_season}.csv"
    ));
    ports
        .writer
        .write_final_table_csv(&table_path, &catalog.columns, &rows)?;

    let summary = PlayerSummary {
        slug: slug.to_string(),
        player_id,
        seasons: config.run.seasons.clone(),
        partitions_found: catalog_report.partitions_found,
        partitions_missing: catalog_report.partitions_missing,
        games: catalog.events.len(),
        posts_loaded: post_report.rows_read,
        invalid_timestamps: post_report.invalid_timestamps,
        all_scores_missing: post_report.all_scores_missing,
        duplicates_removed: dedup.removed,
        beyond_tolerance: match_outcome.beyond_tolerance,
        games_with_sentiment,
        rows_written: rows.len(),
        first_game: catalog_report.first_date.map(|date| date.to_string()),
        last_game: catalog_report.last_date.map(|date| date.to_string()),
        output_path: table_path.display().to_string(),
    };

    let summary_json = serde_json::to_value(&summary)
        .map_err(|err| format!("failed to serialize player summary: {err}"))?;
    let summary_path = out_dir.join(format!("{slug}_summary.json"));
    ports.writer.write_summary_json(&summary_path, &summary_json)?;

    tracing::info!(
        slug,
        rows = summary.rows_written,
        games_with_sentiment,
        output = %table_path.display(),
        "player pipeline complete"
    );
    Ok(PlayerOutcome::Completed(summary))
}
