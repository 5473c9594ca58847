use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::MonthlyRankingEntry;

pub fn list_all(conn: &mut DbConn) -> Result<Vec<MonthlyRankingEntry>> {
    let sql = "SELECT player_id, month, year, total_points FROM monthly_ranking ORDER BY rowid";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_ranking_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read monthly ranking")?;

    Ok(rows)
}

/// Regenerates the whole ranking table from `entries`.
pub fn replace_all(conn: &mut DbConn, entries: &[MonthlyRankingEntry]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM monthly_ranking", [])
        .context("Failed to clear monthly ranking")?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO monthly_ranking (player_id, month, year, total_points) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for entry in entries {
            stmt.execute(params![entry.player_id, entry.month, entry.year, entry.total_points])
                .context("Failed to insert ranking entry")?;
        }
    }

    tx.commit().context("Failed to commit monthly ranking")?;
    Ok(())
}

fn parse_ranking_row(row: &rusqlite::Row) -> rusqlite::Result<MonthlyRankingEntry> {
    Ok(MonthlyRankingEntry {
        player_id: row.get(0)?,
        month: row.get(1)?,
        year: row.get(2)?,
        total_points: row.get(3)?,
    })
}
