use courtside_domain::repositories::final_table::FinalTableWriter;
use courtside_domain::value_objects::final_row::FinalRow;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Aggregate columns appended after the raw gamelog columns, in output
/// order. Empty cells mark the delta fields for games with no posts.
const AGGREGATE_COLUMNS: [&str; 11] = [
    "game_date",
    "mean_sentiment",
    "min_sentiment",
    "max_sentiment",
    "pos_share",
    "neg_share",
    "post_count",
    "avg_delta_days",
    "min_delta_days",
    "max_delta_days",
    "has_sentiment_data",
];

pub fn write_final_table_csv(
    path: &Path,
    columns: &[String],
    rows: &[FinalRow],
) -> Result<(), String> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|err| format!("failed to create final table csv {}: {}", path.display(), err))?;

    let mut header: Vec<String> = columns.to_vec();
    header.extend(AGGREGATE_COLUMNS.iter().map(|name| name.to_string()));
    wtr.write_record(&header)
        .map_err(|err| format!("failed to write final table header: {err}"))?;

    for row in rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.extend(row.cells.iter().cloned());
        while record.len() < columns.len() {
            record.push(String::new());
        }
        record.push(row.date.format("%Y-%m-%d").to_string());
        record.push(row.mean_sentiment.to_string());
        record.push(row.min_sentiment.to_string());
        record.push(row.max_sentiment.to_string());
        record.push(row.pos_share.to_string());
        record.push(row.neg_share.to_string());
        record.push(row.post_count.to_string());
        record.push(optional_cell(row.avg_delta_days));
        record.push(optional_cell(row.min_delta_days));
        record.push(optional_cell(row.max_delta_days));
        record.push(row.has_sentiment_data.to_string());
        wtr.write_record(&record)
            .map_err(|err| format!("failed to write final table row: {err}"))?;
    }

    wtr.flush()
        .map_err(|err| format!("failed to flush final table csv: {err}"))
}

fn optional_cell(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

pub fn write_summary_json(path: &Path, summary: &serde_json::Value) -> Result<(), String> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|err| format!("failed to serialize summary: {err}"))?;
    let mut file = fs::File::create(path)
        .map_err(|err| format!("failed to create summary {}: {}", path.display(), err))?;
    file.write_all(json.as_bytes())
        .map_err(|err| format!("failed to write summary: {err}"))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemFinalTableWriter;

impl FilesystemFinalTableWriter {
    pub fn new() -> Self {
        Self
    }
}

fn record_write_metrics(kind: &'static str, start: Instant, result: &Result<(), String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "courtside.infra.reporting.write.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("courtside.infra.reporting.write_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

impl FinalTableWriter for FilesystemFinalTableWriter {
    fn ensure_dir(&self, path: &Path) -> Result<(), String> {
        let start = Instant::now();
        let result = fs::create_dir_all(path)
            .map_err(|err| format!("failed to create dir {}: {}", path.display(), err));
        record_write_metrics("ensure_dir", start, &result);
        result
    }

    fn write_final_table_csv(
        &self,
        path: &Path,
        columns: &[String],
        rows: &[FinalRow],
    ) -> Result<(), String> {
        let start = Instant::now();
        let result = write_final_table_csv(path, columns, rows);
        record_write_metrics("final_table_csv", start, &result);
        result
    }

    fn write_summary_json(&self, path: &Path, summary: &serde_json::Value) -> Result<(), String> {
        let start = Instant::now();
        let result = write_summary_json(path, summary);
        record_write_metrics("summary_json", start, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::write_final_table_csv;
    use chrono::NaiveDate;
    use courtside_domain::value_objects::final_row::FinalRow;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_tmp_path(name: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("courtside_{name}_{}_{}.csv", std::process::id(), now))
    }

    fn row(day: u32, post_count: usize) -> FinalRow {
        let matched = post_count > 0;
        FinalRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date"),
            cells: vec![format!("vs {day}"), "W".to_string()],
            mean_sentiment: if matched { 0.25 } else { 0.0 },
            min_sentiment: 0.0,
            max_sentiment: if matched { 0.5 } else { 0.0 },
            pos_share: if matched { 0.5 } else { 0.0 },
            neg_share: 0.0,
            post_count,
            avg_delta_days: matched.then_some(1.0),
            min_delta_days: matched.then_some(0.0),
            max_delta_days: matched.then_some(2.0),
            has_sentiment_data: matched,
        }
    }

    #[test]
    fn writes_raw_columns_then_aggregates() {
        let path = unique_tmp_path("final_table");
        let columns = vec!["MATCHUP".to_string(), "WL".to_string()];
        write_final_table_csv(&path, &columns, &[row(5, 2), row(7, 0)]).expect("write");

        let contents = fs::read_to_string(&path).expect("read back");
        let mut lines = contents.lines();
        let header = lines.next().expect("header");
        assert!(header.starts_with("MATCHUP,WL,game_date,mean_sentiment"));
        assert!(header.ends_with("has_sentiment_data"));

        let matched = lines.next().expect("matched row");
        assert!(matched.starts_with("vs 5,W,2024-01-05,0.25"));
        assert!(matched.ends_with("true"));

        // unmatched game: zero counts, empty delta cells
        let unmatched = lines.next().expect("unmatched row");
        assert!(unmatched.contains(",0,,,"));
        assert!(unmatched.ends_with("false"));
    }
}
