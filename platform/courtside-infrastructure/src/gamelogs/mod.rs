use chrono::NaiveDate;
use courtside_domain::repositories::game_log::{GameLogQuery, GameLogRepository};
use courtside_domain::value_objects::game::{CatalogReport, GameCatalog, GameEvent};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Accepted spellings of the gamelog date column, resolved once per
/// partition. Downstream code never inspects raw headers.
const DATE_COLUMNS: [&str; 2] = ["GAME_DATE", "game_date"];

/// Season-partitioned gamelog CSVs laid out as
/// `<stats_base>/season_<year>/<slug>_gamelog.csv`.
#[derive(Debug, Clone)]
pub struct FilesystemGameLogRepository {
    stats_base: PathBuf,
}

impl FilesystemGameLogRepository {
    pub fn new(stats_base: PathBuf) -> Self {
        Self { stats_base }
    }

    fn partition_path(&self, slug: &str, season: i32) -> PathBuf {
        self.stats_base
            .join(format!("season_{season}"))
            .join(format!("{slug}_gamelog.csv"))
    }
}

fn record_read_metrics<T>(kind: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "courtside.infra.gamelogs.read.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("courtside.infra.gamelogs.read_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

impl GameLogRepository for FilesystemGameLogRepository {
    fn load_catalog(
        &self,
        query: &GameLogQuery,
    ) -> Result<Option<(GameCatalog, CatalogReport)>, String> {
        let start = Instant::now();
        let result = self.load_catalog_inner(query);
        record_read_metrics("gamelog_catalog", start, &result);
        result
    }
}

impl FilesystemGameLogRepository {
    fn load_catalog_inner(
        &self,
        query: &GameLogQuery,
    ) -> Result<Option<(GameCatalog, CatalogReport)>, String> {
        let mut catalog = GameCatalog::default();
        let mut report = CatalogReport::default();

        for season in &query.seasons {
            let path = self.partition_path(&query.slug, *season);
            if !path.exists() {
                tracing::warn!(
                    slug = %query.slug,
                    season,
                    path = %path.display(),
                    "gamelog partition missing, skipping"
                );
                report.partitions_missing += 1;
                continue;
            }
            load_partition(&path, &mut catalog)?;
            report.partitions_found += 1;
        }

        if report.partitions_found == 0 {
            return Ok(None);
        }

        catalog.events.sort_by_key(|event| event.date);
        report.rows_loaded = catalog.events.len();
        report.first_date = catalog.events.first().map(|event| event.date);
        report.last_date = catalog.events.last().map(|event| event.date);

        Ok(Some((catalog, report)))
    }
}

fn load_partition(path: &Path, catalog: &mut GameCatalog) -> Result<(), String> {
    let file = File::open(path)
        .map_err(|err| format!("failed to open gamelog CSV {}: {}", path.display(), err))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|err| format!("failed to read gamelog headers {}: {}", path.display(), err))?
        .clone();

    let date_idx = headers
        .iter()
        .position(|header| DATE_COLUMNS.contains(&header))
        .ok_or_else(|| {
            format!(
                "no game date column in {} (expected one of {:?})",
                path.display(),
                DATE_COLUMNS
            )
        })?;

    // Map this partition's columns into the catalog's header union; newly
    // seen columns pad every already-loaded event with an empty cell.
    let mut column_map = Vec::with_capacity(headers.len());
    for header in headers.iter() {
        let target = match catalog.columns.iter().position(|column| column == header) {
            Some(idx) => idx,
            None => {
                catalog.columns.push(header.to_string());
                for event in &mut catalog.events {
                    event.cells.push(String::new());
                }
                catalog.columns.len() - 1
            }
        };
        column_map.push(target);
    }

    for result in reader.records() {
        let record =
            result.map_err(|err| format!("failed to parse gamelog row {}: {}", path.display(), err))?;
        let raw_date = record.get(date_idx).unwrap_or("");
        let date = parse_game_date(raw_date)
            .map_err(|err| format!("{}: {}", path.display(), err))?;

        let mut cells = vec![String::new(); catalog.columns.len()];
        for (pos, value) in record.iter().enumerate() {
            if let Some(target) = column_map.get(pos) {
                cells[*target] = value.to_string();
            }
        }
        catalog.events.push(GameEvent { date, cells });
    }

    Ok(())
}

/// The gamelog export writes dates like `APR 09, 2024`; ISO dates are
/// accepted as a secondary form. Anything else leaves the catalog without
/// a sort order, so the whole load fails.
fn parse_game_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%b %d, %Y") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    Err(format!("malformed game date '{value}'"))
}
