use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{ParticipationRecord, PlayerId};

/// Format of `recorded_at`, e.g. "14/1/2026, 10:25:55".
pub const RECORDED_AT_FORMAT: &str = "%-d/%-m/%Y, %H:%M:%S";

pub fn format_recorded_at(timestamp: NaiveDateTime) -> String {
    timestamp.format(RECORDED_AT_FORMAT).to_string()
}

/// Parses "d/m/yyyy, h:mm:ss" with or without zero padding.
pub fn parse_recorded_at(text: &str) -> Option<NaiveDateTime> {
    let (date_part, time_part) = text.trim().split_once(',')?;

    let date: Vec<u32> = parse_fields(date_part, '/')?;
    let time: Vec<u32> = parse_fields(time_part, ':')?;
    let ([day, month, year], [hour, minute, second]) = (date.as_slice(), time.as_slice()) else {
        return None;
    };

    NaiveDate::from_ymd_opt(*year as i32, *month, *day)?.and_hms_opt(*hour, *minute, *second)
}

fn parse_fields(text: &str, separator: char) -> Option<Vec<u32>> {
    text.trim()
        .split(separator)
        .map(|field| field.trim().parse().ok())
        .collect()
}

/// Insertion-time guard: splits `records` into those whose (player, tournament)
/// is not yet persisted and those that are.
///
/// The guard ignores the category, so a new category for an already recorded
/// tournament is held back as well. Records in the same batch are not checked
/// against each other.
pub fn split_new_records(
    records: Vec<ParticipationRecord>,
    persisted: &HashSet<(PlayerId, String)>,
) -> (Vec<ParticipationRecord>, Vec<ParticipationRecord>) {
    records
        .into_iter()
        .partition(|record| !persisted.contains(&record.tournament_key()))
}

#[derive(Debug, Default, PartialEq)]
pub struct CleanupOutcome {
    /// Surviving records in ledger order.
    pub kept: Vec<ParticipationRecord>,
    pub removed: usize,
    /// Survivors whose `recorded_at` could not be parsed.
    pub undated: usize,
}

struct Survivor {
    position: usize,
    recorded_at: Option<NaiveDateTime>,
}

impl Survivor {
    fn is_superseded_by(&self, recorded_at: Option<NaiveDateTime>) -> bool {
        match (recorded_at, self.recorded_at) {
            (Some(new), Some(current)) => new < current,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Keeps one record per (player, tournament, category): the one recorded earliest.
///
/// Dated records always beat undated ones. An undated record survives only when
/// its group has no dated record, and then only the first one in ledger order.
/// Equal timestamps keep the record that comes first in the ledger.
pub fn deduplicate(records: Vec<ParticipationRecord>) -> CleanupOutcome {
    let total = records.len();
    let mut survivors: HashMap<(String, String, String), Survivor> = HashMap::new();

    for (position, record) in records.iter().enumerate() {
        let recorded_at = parse_recorded_at(&record.recorded_at);
        let (player, tournament, category) = record.category_key();
        let key = (player.to_string(), tournament.to_string(), category.to_string());

        match survivors.get_mut(&key) {
            Some(current) => {
                if current.is_superseded_by(recorded_at) {
                    *current = Survivor { position, recorded_at };
                }
            }
            None => {
                survivors.insert(key, Survivor { position, recorded_at });
            }
        }
    }

    let undated = survivors.values().filter(|s| s.recorded_at.is_none()).count();
    let keep: HashSet<usize> = survivors.values().map(|s| s.position).collect();
    let kept: Vec<ParticipationRecord> = records
        .into_iter()
        .enumerate()
        .filter(|(position, _)| keep.contains(position))
        .map(|(_, record)| record)
        .collect();

    CleanupOutcome {
        removed: total - kept.len(),
        kept,
        undated,
    }
}
