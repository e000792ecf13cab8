use crate::value_objects::post::Post;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How to resolve posts that share a `post_id`. Overlapping fetch windows
/// routinely pull the same post twice, so this is a deliberate, configured
/// choice rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupStrategy {
    /// Keep the first occurrence in source order.
    First,
    /// Keep the last occurrence in source order.
    Last,
    /// Treat any duplicate id as a data error.
    Error,
    /// Average the duplicate scores onto the earliest occurrence.
    Merge,
}

#[derive(Debug)]
pub struct DedupOutcome {
    pub posts: Vec<Post>,
    pub removed: usize,
}

pub fn dedup_posts(posts: Vec<Post>, strategy: DedupStrategy) -> Result<DedupOutcome, String> {
    let total = posts.len();

    let posts = match strategy {
        DedupStrategy::First => {
            let mut seen: HashMap<String, ()> = HashMap::with_capacity(total);
            posts
                .into_iter()
                .filter(|post| seen.insert(post.id.clone(), ()).is_none())
                .collect()
        }
        DedupStrategy::Last => {
            let mut last_index: HashMap<String, usize> = HashMap::with_capacity(total);
            for (idx, post) in posts.iter().enumerate() {
                last_index.insert(post.id.clone(), idx);
            }
            posts
                .into_iter()
                .enumerate()
                .filter(|(idx, post)| last_index.get(&post.id) == Some(idx))
                .map(|(_, post)| post)
                .collect()
        }
        DedupStrategy::Error => {
            let mut seen: HashMap<String, ()> = HashMap::with_capacity(total);
            for post in &posts {
                if seen.insert(post.id.clone(), ()).is_some() {
                    return Err(format!("duplicate post_id '{}'", post.id));
                }
            }
            posts
        }
        DedupStrategy::Merge => {
            let mut sums: HashMap<String, (f64, usize)> = HashMap::with_capacity(total);
            for post in &posts {
                let entry = sums.entry(post.id.clone()).or_insert((0.0, 0));
                entry.0 += post.compound_avg;
                entry.1 += 1;
            }
            let mut seen: HashMap<String, ()> = HashMap::with_capacity(total);
            posts
                .into_iter()
                .filter(|post| seen.insert(post.id.clone(), ()).is_none())
                .map(|mut post| {
                    if let Some((sum, count)) = sums.get(&post.id) {
                        post.compound_avg = *sum / *count as f64;
                    }
                    post
                })
                .collect()
        }
    };

    Ok(DedupOutcome {
        removed: total - posts.len(),
        posts,
    })
}
