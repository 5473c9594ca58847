pub mod board;
pub mod models;

pub use board::build_snapshot;
pub use models::{BoardSnapshot, HistoryRow, PlayerRow, PodiumRow, RankingRow, UNKNOWN_PLAYER_NAME};
