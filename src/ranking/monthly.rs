use std::collections::BTreeMap;

use crate::domain::{MonthlyRankingEntry, ParticipationRecord, Period};

/// Sums points per (player, month, year).
///
/// Every player with at least one record in a month gets an entry, active or
/// not. Output is ordered by period, then player id.
pub fn aggregate_monthly(records: &[ParticipationRecord]) -> Vec<MonthlyRankingEntry> {
    let mut totals: BTreeMap<(Period, &str), u32> = BTreeMap::new();

    for record in records {
        *totals.entry((record.period(), record.player_id.as_str())).or_insert(0) += record.points;
    }

    totals
        .into_iter()
        .map(|((period, player_id), total_points)| MonthlyRankingEntry {
            player_id: player_id.to_string(),
            month: period.month,
            year: period.year,
            total_points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;

    fn record(player: &str, tournament: &str, month: u32, year: i32, stage: Stage) -> ParticipationRecord {
        ParticipationRecord {
            player_id: player.to_string(),
            tournament: tournament.to_string(),
            date: format!("01/{:02}/{}", month, year),
            month,
            year,
            category: "Primera".to_string(),
            points: stage.points(),
            stage,
            recorded_at: "1/1/2026, 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_sums_points_per_player_and_month() {
        let records = vec![
            record("16118", "Copa A", 12, 2025, Stage::GroupStage),
            record("16118", "Copa B", 12, 2025, Stage::SemiFinal),
        ];

        let ranking = aggregate_monthly(&records);

        assert_eq!(
            ranking,
            vec![MonthlyRankingEntry {
                player_id: "16118".to_string(),
                month: 12,
                year: 2025,
                total_points: 22,
            }]
        );
    }

    #[test]
    fn test_months_and_players_are_separate_groups() {
        let records = vec![
            record("1", "Copa A", 12, 2025, Stage::Final),
            record("1", "Copa B", 1, 2026, Stage::Champion),
            record("2", "Copa B", 1, 2026, Stage::Final),
            record("1", "Copa C", 1, 2026, Stage::RoundOf16),
        ];

        let ranking = aggregate_monthly(&records);

        assert_eq!(ranking.len(), 3);
        assert_eq!((ranking[0].month, ranking[0].year, ranking[0].total_points), (12, 2025, 40));
        assert_eq!((ranking[1].player_id.as_str(), ranking[1].total_points), ("1", 58));
        assert_eq!((ranking[2].player_id.as_str(), ranking[2].total_points), ("2", 40));
    }

    #[test]
    fn test_uses_stored_points() {
        let mut odd = record("1", "Copa", 3, 2026, Stage::Final);
        odd.points = 7;
        assert_eq!(aggregate_monthly(&[odd])[0].total_points, 7);
        assert!(aggregate_monthly(&[]).is_empty());
    }
}
