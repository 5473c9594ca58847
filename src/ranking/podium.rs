use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{MonthlyRankingEntry, Period, PodiumEntry};

pub const PODIUM_SIZE: usize = 3;

/// Orders player ids numerically when both are numeric codes. Numeric ids sort
/// before anything else; the rest compare as text.
pub fn compare_player_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Standings order: points descending, ties broken by player id ascending.
pub fn standings_order(a: &MonthlyRankingEntry, b: &MonthlyRankingEntry) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| compare_player_ids(&a.player_id, &b.player_id))
}

/// Entries of `period` sorted in standings order.
pub fn standings(entries: &[MonthlyRankingEntry], period: Period) -> Vec<&MonthlyRankingEntry> {
    let mut month: Vec<&MonthlyRankingEntry> = entries.iter().filter(|e| e.period() == period).collect();
    month.sort_by(|a, b| standings_order(a, b));
    month
}

/// Top three players of every month, ranked 1 to 3.
pub fn calculate_podiums(entries: &[MonthlyRankingEntry]) -> Vec<PodiumEntry> {
    let mut by_period: BTreeMap<Period, Vec<&MonthlyRankingEntry>> = BTreeMap::new();
    for entry in entries {
        by_period.entry(entry.period()).or_default().push(entry);
    }

    by_period
        .into_iter()
        .flat_map(|(period, mut month)| {
            month.sort_by(|a, b| standings_order(a, b));
            month
                .into_iter()
                .take(PODIUM_SIZE)
                .enumerate()
                .map(move |(position, entry)| PodiumEntry {
                    month: period.month,
                    year: period.year,
                    rank: position as u32 + 1,
                    player_id: entry.player_id.clone(),
                    total_points: entry.total_points,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player: &str, month: u32, year: i32, points: u32) -> MonthlyRankingEntry {
        MonthlyRankingEntry {
            player_id: player.to_string(),
            month,
            year,
            total_points: points,
        }
    }

    #[test]
    fn test_top_three_with_tie_broken_by_player_id() {
        let entries = vec![
            entry("B", 1, 2026, 50),
            entry("D", 1, 2026, 10),
            entry("A", 1, 2026, 50),
            entry("C", 1, 2026, 30),
        ];

        let podiums = calculate_podiums(&entries);

        let summary: Vec<(u32, &str, u32)> = podiums
            .iter()
            .map(|p| (p.rank, p.player_id.as_str(), p.total_points))
            .collect();
        assert_eq!(summary, vec![(1, "A", 50), (2, "B", 50), (3, "C", 30)]);
        assert!(podiums.iter().all(|p| p.month == 1 && p.year == 2026));
    }

    #[test]
    fn test_numeric_ids_compare_as_numbers() {
        let entries = vec![entry("16118", 1, 2026, 20), entry("9001", 1, 2026, 20)];
        let podiums = calculate_podiums(&entries);
        assert_eq!(podiums[0].player_id, "9001");
        assert_eq!(podiums[1].player_id, "16118");
    }

    #[test]
    fn test_each_month_gets_its_own_podium() {
        let entries = vec![
            entry("1", 12, 2025, 10),
            entry("2", 1, 2026, 40),
            entry("3", 1, 2026, 60),
        ];

        let podiums = calculate_podiums(&entries);

        assert_eq!(podiums.len(), 3);
        assert_eq!((podiums[0].month, podiums[0].year, podiums[0].rank), (12, 2025, 1));
        assert_eq!((podiums[1].player_id.as_str(), podiums[1].rank), ("3", 1));
        assert_eq!((podiums[2].player_id.as_str(), podiums[2].rank), ("2", 2));
    }

    #[test]
    fn test_standings_filters_period() {
        let entries = vec![entry("1", 12, 2025, 10), entry("2", 1, 2026, 40), entry("3", 1, 2026, 60)];
        let january = standings(&entries, Period::new(1, 2026).unwrap());
        let ids: Vec<&str> = january.iter().map(|e| e.player_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn test_compare_player_ids_is_total() {
        assert_eq!(compare_player_ids("9", "10"), Ordering::Less);
        assert_eq!(compare_player_ids("10", "abc"), Ordering::Less);
        assert_eq!(compare_player_ids("abc", "abd"), Ordering::Less);
        assert_eq!(compare_player_ids("007", "7"), Ordering::Less);
    }
}
