use courtside_application::batch::run_batch;
use courtside_application::config::{load_config, Config};
use courtside_application::pipeline::{process_player, PipelinePorts, PlayerOutcome};
use courtside_domain::repositories::game_log::{GameLogQuery, GameLogRepository};
use courtside_domain::repositories::player_ids::PlayerIdCache;
use courtside_domain::repositories::posts::{PostQuery, PostRepository};
use courtside_infrastructure::gamelogs::FilesystemGameLogRepository;
use courtside_infrastructure::player_ids::JsonFilePlayerIdStore;
use courtside_infrastructure::posts::{discover_slugs, FilesystemPostRepository};
use courtside_infrastructure::reporting::FilesystemFinalTableWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub enum Command {
    Run { config: PathBuf, player: String },
    Batch { config: PathBuf },
    Validate { config: PathBuf, player: String },
    Ids { config: PathBuf, set: Vec<String> },
}

pub fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Run { config, player } => run_player(config, player),
        Command::Batch { config } => run_batch_command(config),
        Command::Validate { config, player } => run_validate(config, player),
        Command::Ids { config, set } => run_ids(config, set),
    }
}

struct Infra {
    game_logs: FilesystemGameLogRepository,
    posts: FilesystemPostRepository,
    writer: FilesystemFinalTableWriter,
}

impl Infra {
    fn build(config: &Config) -> Self {
        Self {
            game_logs: FilesystemGameLogRepository::new(PathBuf::from(&config.paths.stats_base)),
            posts: FilesystemPostRepository::new(PathBuf::from(&config.paths.sentiment_base)),
            writer: FilesystemFinalTableWriter::new(),
        }
    }

    fn ports(&self) -> PipelinePorts<'_> {
        PipelinePorts {
            game_logs: &self.game_logs,
            posts: &self.posts,
            writer: &self.writer,
        }
    }
}

fn load_and_validate(path: &Path) -> Result<Config, String> {
    let config = load_config(path)?;
    config.validate()?;
    Ok(config)
}

fn id_store(config: &Config) -> Option<JsonFilePlayerIdStore> {
    config
        .paths
        .player_ids
        .as_ref()
        .map(|path| JsonFilePlayerIdStore::new(PathBuf::from(path)))
}

fn load_ids(config: &Config) -> Result<PlayerIdCache, String> {
    match id_store(config) {
        Some(store) => PlayerIdCache::load(&store),
        None => Ok(PlayerIdCache::default()),
    }
}

fn print_config_summary(command: &str, config: &Config) {
    println!(
        "courtside: {} (seasons={:?}, dedup={:?}, on_empty_posts={:?}, max_delta_days={:?})",
        command,
        config.run.seasons,
        config.dedup_strategy(),
        config.empty_posts_policy(),
        config.max_delta_days(),
    );
    println!(
        "data: stats_base={}, sentiment_base={}, out_dir={}",
        config.paths.stats_base, config.paths.sentiment_base, config.paths.out_dir
    );
}

fn run_player(config_path: PathBuf, player: String) -> Result<(), String> {
    let config = load_and_validate(&config_path)?;
    print_config_summary("run", &config);

    let infra = Infra::build(&config);
    let ids = load_ids(&config)?;

    match process_player(&player, ids.get(&player), &config, &infra.ports())? {
        PlayerOutcome::Completed(summary) => {
            println!(
                "done: {} rows for {} ({} of {} games with sentiment, {} duplicates removed)",
                summary.rows_written,
                summary.slug,
                summary.games_with_sentiment,
                summary.games,
                summary.duplicates_removed,
            );
            println!("output: {}", summary.output_path);
            Ok(())
        }
        PlayerOutcome::SkippedNoGameLogs => {
            Err(format!("no gamelog partitions found for {player}"))
        }
        PlayerOutcome::SkippedNoPosts => Err(format!("no usable posts for {player}")),
    }
}

fn run_batch_command(config_path: PathBuf) -> Result<(), String> {
    let config = load_and_validate(&config_path)?;
    print_config_summary("batch", &config);

    let slugs = match &config.run.players {
        Some(players) if !players.is_empty() => players.clone(),
        _ => discover_slugs(Path::new(&config.paths.sentiment_base))?,
    };
    println!("processing {} players", slugs.len());

    let infra = Infra::build(&config);
    let ids = load_ids(&config)?;

    let start = Instant::now();
    let report = run_batch(&slugs, &config, &infra.ports(), &ids);
    println!(
        "batch complete: {}/{} succeeded, {} skipped, {} failed in {:.1}s",
        report.succeeded,
        report.processed,
        report.skipped,
        report.failed,
        start.elapsed().as_secs_f64(),
    );
    Ok(())
}

fn run_validate(config_path: PathBuf, player: String) -> Result<(), String> {
    let config = load_and_validate(&config_path)?;
    print_config_summary("validate", &config);

    let infra = Infra::build(&config);
    let query = GameLogQuery {
        slug: player.clone(),
        seasons: config.run.seasons.clone(),
    };
    match infra.game_logs.load_catalog(&query)? {
        Some((catalog, report)) => println!(
            "gamelog report: games={}, partitions_found={}, partitions_missing={}, range={:?}..{:?}",
            catalog.events.len(),
            report.partitions_found,
            report.partitions_missing,
            report.first_date,
            report.last_date,
        ),
        None => println!("gamelog report: no partitions found"),
    }

    let query = PostQuery {
        slug: player.clone(),
    };
    match infra.posts.load_posts(&query)? {
        Some((posts, report)) => println!(
            "posts report: usable={}, rows_read={}, invalid_timestamps={}, all_scores_missing={}, invalid_scores={}, range={:?}..{:?}",
            posts.len(),
            report.rows_read,
            report.invalid_timestamps,
            report.all_scores_missing,
            report.invalid_scores,
            report.first_date,
            report.last_date,
        ),
        None => println!("posts report: no sentiment source found"),
    }

    Ok(())
}

fn run_ids(config_path: PathBuf, set: Vec<String>) -> Result<(), String> {
    let config = load_and_validate(&config_path)?;
    let store = id_store(&config)
        .ok_or_else(|| "paths.player_ids is not configured".to_string())?;
    let mut ids = PlayerIdCache::load(&store)?;

    if set.is_empty() {
        println!("player id cache: {} entries", ids.len());
        return Ok(());
    }

    for entry in &set {
        let (slug, id) = entry
            .split_once('=')
            .ok_or_else(|| format!("invalid --set entry '{entry}' (expected slug=id)"))?;
        let id: u64 = id
            .trim()
            .parse()
            .map_err(|err| format!("invalid player id in '{entry}': {err}"))?;
        ids.insert(slug.trim().to_string(), id);
    }
    ids.save_if_dirty(&store)?;
    println!("player id cache: {} entries", ids.len());
    Ok(())
}
