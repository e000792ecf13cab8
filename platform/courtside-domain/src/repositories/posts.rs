use crate::value_objects::post::{Post, PostReport};

#[derive(Debug, Clone)]
pub struct PostQuery {
    pub slug: String,
}

/// Port for the per-player sentiment post source. `Ok(None)` means the
/// source is absent. Posts come back in source order, already scored but
/// not yet deduplicated; record-level problems are dropped and counted in
/// the report, never raised.
pub trait PostRepository {
    fn load_posts(&self, query: &PostQuery) -> Result<Option<(Vec<Post>, PostReport)>, String>;
}
