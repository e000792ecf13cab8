use chrono::NaiveDate;

/// One game, keyed by calendar date. The gamelog's own columns (matchup,
/// W/L, box-score numbers, ...) are carried opaquely as cells aligned to the
/// owning catalog's header.
#[derive(Debug, Clone, PartialEq)]
pub struct GameEvent {
    pub date: NaiveDate,
    pub cells: Vec<String>,
}

/// All games for one player: the union of the season partitions, sorted
/// ascending by date. `columns` is the union of partition headers in
/// first-seen order; a cell absent from a partition stays empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameCatalog {
    pub columns: Vec<String>,
    pub events: Vec<GameEvent>,
}

impl GameCatalog {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.events.iter().map(|event| event.date).collect()
    }
}

#[derive(Debug, Default)]
pub struct CatalogReport {
    pub partitions_found: usize,
    pub partitions_missing: usize,
    pub rows_loaded: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}
