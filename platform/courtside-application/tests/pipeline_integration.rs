use courtside_application::batch::run_batch;
use courtside_application::config::Config;
use courtside_application::pipeline::{process_player, PipelinePorts, PlayerOutcome};
use courtside_domain::repositories::player_ids::PlayerIdCache;
use courtside_infrastructure::gamelogs::FilesystemGameLogRepository;
use courtside_infrastructure::posts::{discover_slugs, FilesystemPostRepository};
use courtside_infrastructure::reporting::FilesystemFinalTableWriter;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_root(name: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let root =
        std::env::temp_dir().join(format!("courtside_it_{name}_{}_{}", std::process::id(), now));
    fs::create_dir_all(root.join("stats")).expect("create stats dir");
    fs::create_dir_all(root.join("sentiment")).expect("create sentiment dir");
    root
}

fn write_gamelog(root: &PathBuf, season: i32, slug: &str, contents: &str) {
    let dir = root.join("stats").join(format!("season_{season}"));
    fs::create_dir_all(&dir).expect("create season dir");
    fs::write(dir.join(format!("{slug}_gamelog.csv")), contents).expect("write gamelog");
}

fn write_posts(root: &PathBuf, slug: &str, contents: &str) {
    fs::write(
        root.join("sentiment")
            .join(format!("{slug}_reddit_mentions_sentiment.csv")),
        contents,
    )
    .expect("write posts");
}

fn make_config(root: &PathBuf, extra: &str) -> Config {
    let toml_str = format!(
        r#"
[run]
seasons = [2024]

[paths]
stats_base = "{}"
sentiment_base = "{}"
out_dir = "{}"
{extra}
"#,
        root.join("stats").display(),
        root.join("sentiment").display(),
        root.join("out").display(),
    );
    toml::from_str(&toml_str).expect("config should parse")
}

struct Fixture {
    game_logs: FilesystemGameLogRepository,
    posts: FilesystemPostRepository,
    writer: FilesystemFinalTableWriter,
}

impl Fixture {
    fn new(root: &PathBuf) -> Self {
        Self {
            game_logs: FilesystemGameLogRepository::new(root.join("stats")),
            posts: FilesystemPostRepository::new(root.join("sentiment")),
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

fn read_rows(root: &PathBuf, slug: &str) -> Vec<Vec<String>> {
    let path = root
        .join("out")
        .join(format!("{slug}_stats_sentiment_2024_2024.csv"));
    let contents = fs::read_to_string(&path).expect("read final table");
    contents
        .lines()
        .map(|line| line.split(',').map(|cell| cell.to_string()).collect())
        .collect()
}

#[test]
fn duplicate_ids_and_fill_policy_end_to_end() {
    let root = unique_root("scenario");
    write_gamelog(
        &root,
        2024,
        "ant",
        "GAME_DATE,PTS\n2024-01-01,30\n2024-01-03,28\n",
    );
    // a1 appears twice with the same id: only the first occurrence counts
    write_posts(
        &root,
        "ant",
        "post_id,post_created_utc,title_compound,body_compound,comments_compound\n\
a1,2024-01-01 10:00:00,0.8,,\n\
a1,2024-01-01 15:00:00,-0.9,,\n\
a2,2024-01-04 09:00:00,0.0,,\n",
    );

    let config = make_config(&root, "");
    let fixture = Fixture::new(&root);
    let outcome = process_player("ant", Some(1_630_162), &config, &fixture.ports()).expect("run");

    let summary = match outcome {
        PlayerOutcome::Completed(summary) => summary,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.games_with_sentiment, 2);
    assert_eq!(summary.player_id, Some(1_630_162));

    let rows = read_rows(&root, "ant");
    // columns: GAME_DATE, PTS, game_date, mean, min, max, pos, neg,
    // post_count, avg_delta, min_delta, max_delta, has_sentiment_data
    assert_eq!(rows.len(), 3);

    let first = &rows[1];
    assert_eq!(first[2], "2024-01-01");
    assert_eq!(first[3], "0.8");
    assert_eq!(first[8], "1");
    assert_eq!(first[9], "0");

    let second = &rows[2];
    assert_eq!(second[2], "2024-01-03");
    assert_eq!(second[3], "0");
    assert_eq!(second[6], "0");
    assert_eq!(second[7], "0");
    assert_eq!(second[8], "1");
    assert_eq!(second[9], "1");
    assert_eq!(second[12], "true");

    let summary_path = root.join("out").join("ant_summary.json");
    let summary_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(summary_path).expect("read summary"))
            .expect("parse summary");
    assert_eq!(summary_json["duplicates_removed"], 1);
    assert_eq!(summary_json["player_id"], 1_630_162);
}

#[test]
fn absent_posts_still_emit_one_row_per_game() {
    let root = unique_root("emit_empty");
    write_gamelog(
        &root,
        2024,
        "ant",
        "GAME_DATE,PTS\n2024-01-01,30\n2024-01-03,28\n2024-01-07,41\n",
    );

    let config = make_config(&root, "");
    let fixture = Fixture::new(&root);
    let outcome = process_player("ant", None, &config, &fixture.ports()).expect("run");

    let summary = match outcome {
        PlayerOutcome::Completed(summary) => summary,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.games_with_sentiment, 0);

    let rows = read_rows(&root, "ant");
    assert_eq!(rows.len(), 4);
    for row in &rows[1..] {
        assert_eq!(row[8], "0");
        // the delta columns are missing, not zero
        assert_eq!(row[9], "");
        assert_eq!(row[10], "");
        assert_eq!(row[11], "");
        assert_eq!(row[12], "false");
    }
}

#[test]
fn skip_policy_reproduces_the_hard_stop() {
    let root = unique_root("skip_empty");
    write_gamelog(&root, 2024, "ant", "GAME_DATE,PTS\n2024-01-01,30\n");

    let config = make_config(&root, "[cleaning]\non_empty_posts = \"skip\"\n");
    let fixture = Fixture::new(&root);
    let outcome = process_player("ant", None, &config, &fixture.ports()).expect("run");

    assert!(matches!(outcome, PlayerOutcome::SkippedNoPosts));
    assert!(!root
        .join("out")
        .join("ant_stats_sentiment_2024_2024.csv")
        .exists());
}

#[test]
fn nearest_match_assigns_posts_across_games() {
    let root = unique_root("nearest");
    write_gamelog(
        &root,
        2024,
        "ant",
        "GAME_DATE,PTS\n2024-01-01,30\n2024-01-05,28\n2024-01-10,35\n",
    );
    // day 3 ties between day 1 and day 5: earlier game wins; day 7 is
    // closer to day 5 than day 10
    write_posts(
        &root,
        "ant",
        "post_id,post_created_utc,title_compound\n\
a1,2024-01-03 12:00:00,0.5\n\
a2,2024-01-07 12:00:00,0.5\n",
    );

    let config = make_config(&root, "");
    let fixture = Fixture::new(&root);
    process_player("ant", None, &config, &fixture.ports()).expect("run");

    let rows = read_rows(&root, "ant");
    assert_eq!(rows[1][2], "2024-01-01");
    assert_eq!(rows[1][8], "1");
    assert_eq!(rows[1][9], "2");
    assert_eq!(rows[2][2], "2024-01-05");
    assert_eq!(rows[2][8], "1");
    assert_eq!(rows[2][9], "2");
    assert_eq!(rows[3][2], "2024-01-10");
    assert_eq!(rows[3][8], "0");
}

#[test]
fn malformed_game_date_fails_without_output() {
    let root = unique_root("malformed");
    write_gamelog(&root, 2024, "ant", "GAME_DATE,PTS\nnot a date,30\n");
    write_posts(
        &root,
        "ant",
        "post_id,post_created_utc,title_compound\na1,2024-01-01 10:00:00,0.5\n",
    );

    let config = make_config(&root, "");
    let fixture = Fixture::new(&root);
    let err = process_player("ant", None, &config, &fixture.ports()).expect_err("malformed date");
    assert!(err.contains("malformed game date"));
    assert!(!root.join("out").exists());
}

#[test]
fn batch_counts_outcomes_independently() {
    let root = unique_root("batch");
    // ant: complete; ghost: posts but no gamelogs
    write_gamelog(&root, 2024, "ant", "GAME_DATE,PTS\n2024-01-01,30\n");
    write_posts(
        &root,
        "ant",
        "post_id,post_created_utc,title_compound\na1,2024-01-01 10:00:00,0.5\n",
    );
    write_posts(
        &root,
        "ghost",
        "post_id,post_created_utc,title_compound\nb1,2024-01-01 10:00:00,0.5\n",
    );

    let config = make_config(&root, "");
    let fixture = Fixture::new(&root);
    let slugs = discover_slugs(&root.join("sentiment")).expect("discover");
    assert_eq!(slugs, vec!["ant", "ghost"]);

    let ids = PlayerIdCache::default();
    let report = run_batch(&slugs, &config, &fixture.ports(), &ids);
    assert_eq!(report.processed, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);
}
