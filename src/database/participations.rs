use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::{params, Transaction};

use super::connection::DbConn;
use crate::domain::{ParticipationRecord, PlayerId, Stage};

const SELECT_COLUMNS: &str = "SELECT player_id, tournament, date, month, year, category, stage, points, recorded_at FROM participations";

/// Every persisted participation, in insertion order.
pub fn list_all(conn: &mut DbConn) -> Result<Vec<ParticipationRecord>> {
    let sql = format!("{} ORDER BY id", SELECT_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_participation_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read participations")?;

    Ok(rows)
}

/// (player, tournament) pairs already in the ledger.
pub fn existing_keys(conn: &mut DbConn) -> Result<HashSet<(PlayerId, String)>> {
    let sql = "SELECT DISTINCT player_id, tournament FROM participations";

    let mut stmt = conn.prepare(sql)?;
    let keys = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<HashSet<_>>>()
        .context("Failed to read participation keys")?;

    Ok(keys)
}

pub fn append(conn: &mut DbConn, records: &[ParticipationRecord]) -> Result<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    insert_records(&tx, records)?;
    tx.commit().context("Failed to commit appended participations")?;
    Ok(records.len())
}

pub fn clear(conn: &mut DbConn) -> Result<()> {
    conn.execute("DELETE FROM participations", [])
        .context("Failed to clear participations")?;
    Ok(())
}

/// Clears the table and rewrites it with `records`, in one transaction.
pub fn replace_all(conn: &mut DbConn, records: &[ParticipationRecord]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM participations", [])
        .context("Failed to clear participations")?;
    insert_records(&tx, records)?;
    tx.commit().context("Failed to commit participation rewrite")?;
    Ok(())
}

fn insert_records(tx: &Transaction, records: &[ParticipationRecord]) -> Result<()> {
    let sql = "INSERT INTO participations (player_id, tournament, date, month, year, category, stage, points, recorded_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
    let mut stmt = tx.prepare(sql)?;

    for record in records {
        stmt.execute(params![
            record.player_id,
            record.tournament,
            record.date,
            record.month,
            record.year,
            record.category,
            record.stage.label(),
            record.points,
            record.recorded_at,
        ])
        .with_context(|| format!("Failed to insert participation of {} in {}", record.player_id, record.tournament))?;
    }

    Ok(())
}

fn parse_participation_row(row: &rusqlite::Row) -> rusqlite::Result<ParticipationRecord> {
    let stage: String = row.get(6)?;
    Ok(ParticipationRecord {
        player_id: row.get(0)?,
        tournament: row.get(1)?,
        date: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
        category: row.get(5)?,
        stage: Stage::parse(&stage),
        points: row.get(7)?,
        recorded_at: row.get(8)?,
    })
}
