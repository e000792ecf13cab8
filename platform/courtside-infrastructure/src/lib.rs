pub mod gamelogs;
pub mod player_ids;
pub mod posts;
pub mod reporting;
