use courtside_domain::services::dedup::DedupStrategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do with a player whose games exist but whose post set is absent
/// or empty after cleaning. `EmitEmpty` keeps the one-row-per-game
/// invariant by writing a fully filled table; `Skip` drops the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyPostsPolicy {
    EmitEmpty,
    Skip,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub run: RunConfig,
    pub paths: PathsConfig,
    pub cleaning: Option<CleaningConfig>,
    pub matching: Option<MatchingConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub seasons: Vec<i32>,
    /// Explicit player slugs; when omitted the batch runner discovers
    /// players from the sentiment directory.
    pub players: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub stats_base: String,
    pub sentiment_base: String,
    pub out_dir: String,
    pub player_ids: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CleaningConfig {
    pub dedup: Option<DedupStrategy>,
    pub on_empty_posts: Option<EmptyPostsPolicy>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    pub max_delta_days: Option<f64>,
}

impl Config {
    pub fn dedup_strategy(&self) -> DedupStrategy {
        self.cleaning
            .as_ref()
            .and_then(|cleaning| cleaning.dedup)
            .unwrap_or(DedupStrategy::First)
    }

    pub fn empty_posts_policy(&self) -> EmptyPostsPolicy {
        self.cleaning
            .as_ref()
            .and_then(|cleaning| cleaning.on_empty_posts)
            .unwrap_or(EmptyPostsPolicy::EmitEmpty)
    }

    pub fn max_delta_days(&self) -> Option<f64> {
        self.matching
            .as_ref()
            .and_then(|matching| matching.max_delta_days)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.run.seasons.is_empty() {
            return Err("run.seasons must list at least one season".to_string());
        }
        if let Some(limit) = self.max_delta_days() {
            if !limit.is_finite() || limit < 0.0 {
                return Err(format!(
                    "matching.max_delta_days must be a non-negative number, got {limit}"
                ));
            }
        }
        if let Some(players) = &self.run.players {
            if players.iter().any(|slug| slug.trim().is_empty()) {
                return Err("run.players must not contain empty slugs".to_string());
            }
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let (config, _source) = load_config_with_source(path)?;
    Ok(config)
}

pub fn load_config_with_source(path: &Path) -> Result<(Config, String), String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config = toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    Ok((config, contents))
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}
