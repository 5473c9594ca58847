use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::period::Period;
use super::stages::Stage;

/// Player code on the results site (e.g. "16118").
pub type PlayerId = String;

/// Date format used for tournament dates everywhere in the ledger.
pub const TOURNAMENT_DATE_FORMAT: &str = "%d/%m/%Y";

/// One `<tr>` of a player's match-history page, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub index: usize,
    /// Row carries the tournament-header marker.
    pub is_header: bool,
    /// Row is a result highlighted as the tournament winner.
    pub is_champion_result: bool,
    /// Player codes of every result link found in the row.
    pub player_codes: Vec<PlayerId>,
    /// Separator text such as "Primera | Libre | Semifinal".
    pub label: Option<String>,
    /// Header text whose first 10 characters are the tournament date.
    pub header_text: Option<String>,
    pub tournament_name: Option<String>,
}

impl RawRow {
    pub fn references_player(&self, player_id: &str) -> bool {
        self.player_codes.iter().any(|code| code == player_id)
    }

    /// Label text, only when it carries the `|` category delimiter.
    pub fn delimited_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| label.contains('|'))
    }
}

/// Contiguous row range `[start_index, end_index)` belonging to one tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentBlock {
    pub start_index: usize,
    pub end_index: usize,
    pub name: String,
    pub date: NaiveDate,
}

impl TournamentBlock {
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn period(&self) -> Period {
        Period::of_date(self.date)
    }

    pub fn rows<'a>(&self, rows: &'a [RawRow]) -> &'a [RawRow] {
        let end = self.end_index.min(rows.len());
        let start = self.start_index.min(end);
        &rows[start..end]
    }
}

/// Best stage a player reached in one category of one tournament, before persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipationCandidate {
    pub tournament: String,
    pub date: NaiveDate,
    pub category: String,
    pub stage: Stage,
}

/// Canonical persisted participation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRecord {
    pub player_id: PlayerId,
    pub tournament: String,
    /// "dd/mm/yyyy"
    pub date: String,
    pub month: u32,
    pub year: i32,
    pub category: String,
    pub stage: Stage,
    pub points: u32,
    /// Localized "d/m/yyyy, HH:MM:SS" timestamp of when the row was first recorded.
    pub recorded_at: String,
}

impl ParticipationRecord {
    pub fn from_candidate(player_id: &str, candidate: ParticipationCandidate, recorded_at: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            date: candidate.date.format(TOURNAMENT_DATE_FORMAT).to_string(),
            month: candidate.date.month(),
            year: candidate.date.year(),
            points: candidate.stage.points(),
            tournament: candidate.tournament,
            category: candidate.category,
            stage: candidate.stage,
            recorded_at: recorded_at.to_string(),
        }
    }

    /// Key used by the insertion-time guard: (player, tournament).
    pub fn tournament_key(&self) -> (PlayerId, String) {
        (self.player_id.clone(), self.tournament.clone())
    }

    /// Key the cleanup pass deduplicates on: (player, tournament, category).
    pub fn category_key(&self) -> (&str, &str, &str) {
        (&self.player_id, &self.tournament, &self.category)
    }

    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }
}

/// A player's summed points for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRankingEntry {
    pub player_id: PlayerId,
    pub month: u32,
    pub year: i32,
    pub total_points: u32,
}

impl MonthlyRankingEntry {
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodiumEntry {
    pub month: u32,
    pub year: i32,
    /// 1, 2 or 3
    pub rank: u32,
    pub player_id: PlayerId,
    pub total_points: u32,
}

/// Club member as listed on the club's roster page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub active: bool,
    pub category: String,
}
