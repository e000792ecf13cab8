use crate::value_objects::game::{CatalogReport, GameCatalog};

#[derive(Debug, Clone)]
pub struct GameLogQuery {
    pub slug: String,
    pub seasons: Vec<i32>,
}

/// Port for the season-partitioned gamelog source. `Ok(None)` means no
/// partition exists for the player at all; a malformed date inside an
/// existing partition is an error (no sort order can be established).
pub trait GameLogRepository {
    fn load_catalog(
        &self,
        query: &GameLogQuery,
    ) -> Result<Option<(GameCatalog, CatalogReport)>, String>;
}
