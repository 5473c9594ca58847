use std::collections::HashMap;

use chrono::{DateTime, Local};

use super::models::{BoardSnapshot, HistoryRow, PlayerRow, PodiumRow, RankingRow, UNKNOWN_PLAYER_NAME};
use crate::domain::{MonthlyRankingEntry, Period, PodiumEntry, RosterEntry};
use crate::ranking::standings;

/// Joins ranking and podium tables with roster names for the public board.
///
/// Every ranked player is listed, active or not; only `players` is
/// restricted to active members.
pub fn build_snapshot(
    roster: &[RosterEntry],
    ranking: &[MonthlyRankingEntry],
    podiums: &[PodiumEntry],
    current: Period,
    generated_at: DateTime<Local>,
) -> BoardSnapshot {
    let by_id: HashMap<&str, &RosterEntry> = roster.iter().map(|p| (p.player_id.as_str(), p)).collect();
    let name_of = |player_id: &str| {
        by_id
            .get(player_id)
            .map_or_else(|| UNKNOWN_PLAYER_NAME.to_string(), |p| p.name.clone())
    };

    let current_ranking = standings(ranking, current)
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| RankingRow {
            position: idx + 1,
            player_id: entry.player_id.clone(),
            name: name_of(&entry.player_id),
            category: by_id.get(entry.player_id.as_str()).map(|p| p.category.clone()),
            total_points: entry.total_points,
        })
        .collect();

    let ranking_history = ranking
        .iter()
        .map(|entry| HistoryRow {
            player_id: entry.player_id.clone(),
            name: name_of(&entry.player_id),
            month: entry.month,
            year: entry.year,
            total_points: entry.total_points,
        })
        .collect();

    let podium_rows = podiums
        .iter()
        .map(|podium| PodiumRow {
            month: podium.month,
            year: podium.year,
            rank: podium.rank,
            player_id: podium.player_id.clone(),
            name: name_of(&podium.player_id),
            total_points: podium.total_points,
        })
        .collect();

    let players = roster
        .iter()
        .filter(|p| p.active)
        .map(|p| PlayerRow {
            player_id: p.player_id.clone(),
            name: p.name.clone(),
            category: p.category.clone(),
        })
        .collect();

    BoardSnapshot {
        last_updated: generated_at.to_rfc3339(),
        current_month: current.month,
        current_year: current.year,
        month_name: current.month_name().to_string(),
        current_ranking,
        ranking_history,
        podiums: podium_rows,
        players,
    }
}
