use crate::value_objects::final_row::FinalRow;
use std::path::Path;

/// Port for the per-player output artifacts: the merged per-game table and
/// the run summary.
pub trait FinalTableWriter {
    fn ensure_dir(&self, path: &Path) -> Result<(), String>;

    fn write_final_table_csv(
        &self,
        path: &Path,
        columns: &[String],
        rows: &[FinalRow],
    ) -> Result<(), String>;

    fn write_summary_json(&self, path: &Path, summary: &serde_json::Value) -> Result<(), String>;
}
