use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use courtside_domain::repositories::posts::{PostQuery, PostRepository};
use courtside_domain::value_objects::post::{Post, PostReport};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

const ID_COLUMN: &str = "post_id";
const TIMESTAMP_COLUMNS: [&str; 2] = ["post_created_utc", "created_utc"];
const SCORE_COLUMNS: [&str; 3] = ["title_compound", "body_compound", "comments_compound"];
const SOURCE_SUFFIX: &str = "_reddit_mentions_sentiment.csv";

/// Per-player sentiment CSVs laid out as
/// `<sentiment_base>/<slug>_reddit_mentions_sentiment.csv`.
#[derive(Debug, Clone)]
pub struct FilesystemPostRepository {
    sentiment_base: PathBuf,
}

impl FilesystemPostRepository {
    pub fn new(sentiment_base: PathBuf) -> Self {
        Self { sentiment_base }
    }

    fn source_path(&self, slug: &str) -> PathBuf {
        self.sentiment_base.join(format!("{slug}{SOURCE_SUFFIX}"))
    }
}

/// Column indices resolved once from the source header.
#[derive(Debug)]
struct PostSchema {
    id_idx: usize,
    timestamp_idx: usize,
    score_idxs: Vec<(String, usize)>,
}

fn resolve_schema(headers: &csv::StringRecord, path: &Path) -> Result<PostSchema, String> {
    let id_idx = headers
        .iter()
        .position(|header| header == ID_COLUMN)
        .ok_or_else(|| format!("no {} column in {}", ID_COLUMN, path.display()))?;

    let timestamp_idx = headers
        .iter()
        .position(|header| TIMESTAMP_COLUMNS.contains(&header))
        .ok_or_else(|| {
            format!(
                "no timestamp column in {} (expected one of {:?})",
                path.display(),
                TIMESTAMP_COLUMNS
            )
        })?;

    let score_idxs: Vec<(String, usize)> = SCORE_COLUMNS
        .iter()
        .filter_map(|name| {
            headers
                .iter()
                .position(|header| header == *name)
                .map(|idx| (name.to_string(), idx))
        })
        .collect();
    if score_idxs.is_empty() {
        return Err(format!(
            "no compound score columns in {} (expected any of {:?})",
            path.display(),
            SCORE_COLUMNS
        ));
    }

    Ok(PostSchema {
        id_idx,
        timestamp_idx,
        score_idxs,
    })
}

fn record_read_metrics<T>(kind: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "courtside.infra.posts.read.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("courtside.infra.posts.read_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

impl PostRepository for FilesystemPostRepository {
    fn load_posts(&self, query: &PostQuery) -> Result<Option<(Vec<Post>, PostReport)>, String> {
        let start = Instant::now();
        let result = self.load_posts_inner(query);
        record_read_metrics("sentiment_posts", start, &result);
        result
    }
}

impl FilesystemPostRepository {
    fn load_posts_inner(
        &self,
        query: &PostQuery,
    ) -> Result<Option<(Vec<Post>, PostReport)>, String> {
        let path = self.source_path(&query.slug);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)
            .map_err(|err| format!("failed to open sentiment CSV {}: {}", path.display(), err))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|err| format!("failed to read sentiment headers {}: {}", path.display(), err))?
            .clone();
        let schema = resolve_schema(&headers, &path)?;

        let mut posts = Vec::new();
        let mut report = PostReport {
            schema: schema
                .score_idxs
                .iter()
                .map(|(name, _)| name.clone())
                .collect(),
            ..PostReport::default()
        };

        for result in reader.records() {
            let record = result
                .map_err(|err| format!("failed to parse sentiment row {}: {}", path.display(), err))?;
            report.rows_read += 1;

            let raw_timestamp = record.get(schema.timestamp_idx).unwrap_or("");
            let Some(created_utc) = parse_post_timestamp(raw_timestamp) else {
                report.invalid_timestamps += 1;
                continue;
            };

            // compound_avg is the mean of whichever sub-scores are present;
            // a record with none of them is unusable
            let mut sum = 0.0;
            let mut count = 0usize;
            for (_, idx) in &schema.score_idxs {
                let raw = record.get(*idx).unwrap_or("").trim();
                if raw.is_empty() {
                    continue;
                }
                match raw.parse::<f64>() {
                    Ok(value) if value.is_finite() => {
                        sum += value;
                        count += 1;
                    }
                    _ => report.invalid_scores += 1,
                }
            }
            if count == 0 {
                report.all_scores_missing += 1;
                continue;
            }

            let id = record.get(schema.id_idx).unwrap_or("").to_string();
            let post = Post::new(id, created_utc, sum / count as f64);

            report.first_date = Some(match report.first_date {
                Some(first) => first.min(post.post_date),
                None => post.post_date,
            });
            report.last_date = Some(match report.last_date {
                Some(last) => last.max(post.post_date),
                None => post.post_date,
            });

            posts.push(post);
        }

        Ok(Some((posts, report)))
    }
}

fn parse_post_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    None
}

/// Scan the sentiment directory for `<slug>_reddit_mentions_sentiment.csv`
/// files and return the slugs, sorted.
pub fn discover_slugs(sentiment_base: &Path) -> Result<Vec<String>, String> {
    let entries = std::fs::read_dir(sentiment_base).map_err(|err| {
        format!(
            "failed to read sentiment dir {}: {}",
            sentiment_base.display(),
            err
        )
    })?;

    let mut slugs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            format!(
                "failed to read sentiment dir entry {}: {}",
                sentiment_base.display(),
                err
            )
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(slug) = name.strip_suffix(SOURCE_SUFFIX) {
            if !slug.is_empty() {
                slugs.push(slug.to_string());
            }
        }
    }

    slugs.sort();
    Ok(slugs)
}
