use std::collections::HashMap;

use log::debug;

use crate::domain::{ParticipationCandidate, RawRow, Stage, TournamentBlock};

const GROUP_MARKER: &str = "Grupo";
const FINAL_MARKER: &str = "Final";

/// Finds the best stage `player_id` reached in each category of one tournament block.
///
/// A result row is attributed to the nearest delimited label at or above it
/// inside the block. Within a category a later result replaces the stored one
/// only when its stage ranks strictly higher. Stages outside the known
/// vocabulary rank 0 and never produce a candidate.
pub fn extract_participations(
    block: &TournamentBlock,
    rows: &[RawRow],
    player_id: &str,
) -> Vec<ParticipationCandidate> {
    let mut best: Vec<ParticipationCandidate> = Vec::new();
    let mut by_category: HashMap<String, usize> = HashMap::new();

    let end = block.end_index.min(rows.len());
    for k in block.start_index..end {
        let row = &rows[k];
        if !row.references_player(player_id) {
            continue;
        }

        let Some(label) = nearest_label_before(rows, k, block.start_index) else {
            debug!("Row {} in '{}' has no category label above it", k, block.name);
            continue;
        };

        let Some((category, raw_stage)) = split_label(label) else {
            debug!("Row {} in '{}' has an unusable label: {}", k, block.name, label);
            continue;
        };

        let stage = normalize_stage(raw_stage, row.is_champion_result);
        let candidate = ParticipationCandidate {
            tournament: block.name.clone(),
            date: block.date,
            category: category.clone(),
            stage,
        };

        match by_category.get(&category) {
            Some(&idx) => {
                if candidate.stage.rank() > best[idx].stage.rank() {
                    best[idx] = candidate;
                }
            }
            None => {
                if candidate.stage.rank() > 0 {
                    by_category.insert(category, best.len());
                    best.push(candidate);
                }
            }
        }
    }

    best
}

/// Nearest label containing `|` scanning from `index` back to `block_start`, both inclusive.
pub fn nearest_label_before(rows: &[RawRow], index: usize, block_start: usize) -> Option<&str> {
    if index >= rows.len() || block_start > index {
        return None;
    }

    rows[block_start..=index]
        .iter()
        .rev()
        .find_map(RawRow::delimited_label)
}

/// Splits "Cat A | Cat B | Stage" into ("Cat A Cat B", "Stage").
pub fn split_label(label: &str) -> Option<(String, &str)> {
    let parts: Vec<&str> = label.split('|').map(str::trim).collect();
    let (raw_stage, preceding) = parts.split_last()?;

    let mut category = preceding
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if category.is_empty() {
        category = parts[0].to_string();
    }

    if category.is_empty() || raw_stage.is_empty() {
        return None;
    }
    Some((category, raw_stage))
}

pub fn normalize_stage(raw_stage: &str, is_champion_result: bool) -> Stage {
    if raw_stage.contains(GROUP_MARKER) {
        Stage::GroupStage
    } else if raw_stage.contains(FINAL_MARKER) {
        if is_champion_result {
            Stage::Champion
        } else {
            Stage::Final
        }
    } else {
        Stage::parse(raw_stage)
    }
}
