use courtside_domain::repositories::player_ids::PlayerIdStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// JSON-file backing store for the slug -> player id mapping, one flat
/// object per file. A missing file is an empty mapping; an undecodable
/// file is treated as empty with a warning rather than failing the run.
#[derive(Debug, Clone)]
pub struct JsonFilePlayerIdStore {
    path: PathBuf,
}

impl JsonFilePlayerIdStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn record_store_metrics<T>(kind: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "courtside.infra.player_ids.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("courtside.infra.player_ids.io_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

impl PlayerIdStore for JsonFilePlayerIdStore {
    fn load(&self) -> Result<BTreeMap<String, u64>, String> {
        let start = Instant::now();
        let result = self.load_inner();
        record_store_metrics("load", start, &result);
        result
    }

    fn save(&self, ids: &BTreeMap<String, u64>) -> Result<(), String> {
        let start = Instant::now();
        let result = serde_json::to_string_pretty(ids)
            .map_err(|err| format!("failed to serialize player id cache: {err}"))
            .and_then(|json| {
                fs::write(&self.path, json).map_err(|err| {
                    format!(
                        "failed to write player id cache {}: {}",
                        self.path.display(),
                        err
                    )
                })
            });
        record_store_metrics("save", start, &result);
        result
    }
}

impl JsonFilePlayerIdStore {
    fn load_inner(&self) -> Result<BTreeMap<String, u64>, String> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|err| {
            format!(
                "failed to read player id cache {}: {}",
                self.path.display(),
                err
            )
        })?;
        match serde_json::from_str(&contents) {
            Ok(ids) => Ok(ids),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not decode player id cache, starting empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }
}
