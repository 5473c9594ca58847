use serde::Serialize;

pub const UNKNOWN_PLAYER_NAME: &str = "Desconocido";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub last_updated: String,
    pub current_month: u32,
    pub current_year: i32,
    pub month_name: String,
    pub current_ranking: Vec<RankingRow>,
    pub ranking_history: Vec<HistoryRow>,
    pub podiums: Vec<PodiumRow>,
    pub players: Vec<PlayerRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    pub position: usize,
    pub player_id: String,
    pub name: String,
    pub category: Option<String>,
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub player_id: String,
    pub name: String,
    pub month: u32,
    pub year: i32,
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodiumRow {
    pub month: u32,
    pub year: i32,
    pub rank: u32,
    pub player_id: String,
    pub name: String,
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRow {
    pub player_id: String,
    pub name: String,
    pub category: String,
}
