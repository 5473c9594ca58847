use chrono::NaiveDate;
use log::debug;

use crate::domain::{RawRow, TournamentBlock, TOURNAMENT_DATE_FORMAT};

/// Splits a player's history rows into per-tournament blocks.
///
/// A row opens a block only when it carries the header marker, starts with a
/// `dd/mm/yyyy` date and names the tournament. Header rows failing either check
/// are treated as ordinary rows of the block that is already open. Rows before
/// the first valid header belong to no block.
pub fn segment_blocks(rows: &[RawRow]) -> Vec<TournamentBlock> {
    let headers: Vec<(usize, String, NaiveDate)> = rows
        .iter()
        .enumerate()
        .filter_map(|(position, row)| parse_header(row).map(|(name, date)| (position, name, date)))
        .collect();

    headers
        .iter()
        .enumerate()
        .map(|(i, (start, name, date))| {
            let end = headers.get(i + 1).map_or(rows.len(), |next| next.0);
            TournamentBlock {
                start_index: *start,
                end_index: end,
                name: name.clone(),
                date: *date,
            }
        })
        .collect()
}

fn parse_header(row: &RawRow) -> Option<(String, NaiveDate)> {
    if !row.is_header {
        return None;
    }

    let date = row.header_text.as_deref().and_then(parse_header_date);
    let name = row
        .tournament_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    match (name, date) {
        (Some(name), Some(date)) => Some((name.to_string(), date)),
        _ => {
            debug!("Ignoring header row {} without a usable date or name", row.index);
            None
        }
    }
}

/// Parses the date from the first 10 characters of a header text.
pub fn parse_header_date(text: &str) -> Option<NaiveDate> {
    let prefix: String = text.trim().chars().take(10).collect();
    NaiveDate::parse_from_str(&prefix, TOURNAMENT_DATE_FORMAT).ok()
}
