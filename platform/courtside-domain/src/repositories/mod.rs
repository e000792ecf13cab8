pub mod final_table;
pub mod game_log;
pub mod player_ids;
pub mod posts;
