pub mod extractor;
pub mod segmenter;

pub use extractor::{extract_participations, nearest_label_before, normalize_stage, split_label};
pub use segmenter::{parse_header_date, segment_blocks};

use crate::domain::{ParticipationCandidate, Period, RawRow};

/// Runs segmentation and extraction over one player's page, keeping only
/// tournaments played in one of `periods`.
pub fn extract_player_history(
    rows: &[RawRow],
    player_id: &str,
    periods: &[Period],
) -> Vec<ParticipationCandidate> {
    segment_blocks(rows)
        .iter()
        .filter(|block| periods.contains(&block.period()))
        .flat_map(|block| extract_participations(block, rows, player_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;

    fn header(index: usize, date: &str, name: &str) -> RawRow {
        RawRow {
            index,
            is_header: true,
            header_text: Some(format!("{} {}", date, name)),
            tournament_name: Some(name.to_string()),
            ..RawRow::default()
        }
    }

    fn label(index: usize, text: &str) -> RawRow {
        RawRow {
            index,
            label: Some(text.to_string()),
            ..RawRow::default()
        }
    }

    fn result(index: usize, player: &str) -> RawRow {
        RawRow {
            index,
            player_codes: vec![player.to_string()],
            ..RawRow::default()
        }
    }

    #[test]
    fn test_only_target_periods_are_extracted() {
        let rows = vec![
            header(0, "20/01/2026", "Copa Verano"),
            label(1, "Primera | Semifinal"),
            result(2, "16118"),
            header(3, "13/12/2025", "Copa Navidad"),
            label(4, "Primera | Grupo 2"),
            result(5, "16118"),
            header(6, "01/10/2025", "Copa Primavera"),
            label(7, "Primera | Final"),
            result(8, "16118"),
        ];
        let periods = vec![Period::new(1, 2026).unwrap(), Period::new(12, 2025).unwrap()];

        let candidates = extract_player_history(&rows, "16118", &periods);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].tournament, "Copa Verano");
        assert_eq!(candidates[0].stage, Stage::SemiFinal);
        assert_eq!(candidates[1].tournament, "Copa Navidad");
        assert_eq!(candidates[1].stage, Stage::GroupStage);
    }
}
