use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::RosterSyncReport;
use crate::domain::{PlayerId, RosterEntry};

pub fn list_all(conn: &mut DbConn) -> Result<Vec<RosterEntry>> {
    let sql = "SELECT player_id, name, active, category FROM players ORDER BY rowid";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read roster")?;

    Ok(rows)
}

pub fn list_ids(conn: &mut DbConn) -> Result<Vec<PlayerId>> {
    Ok(list_all(conn)?.into_iter().map(|p| p.player_id).collect())
}

/// Makes the roster table match `scraped`: updates known players, adds new
/// ones and removes players that are no longer listed by the club.
pub fn sync(conn: &mut DbConn, scraped: &[RosterEntry]) -> Result<RosterSyncReport> {
    let known: HashSet<PlayerId> = list_ids(conn)?.into_iter().collect();
    let listed: HashSet<&str> = scraped.iter().map(|p| p.player_id.as_str()).collect();

    let mut report = RosterSyncReport::default();
    let tx = conn.transaction()?;

    {
        let mut upsert = tx.prepare(
            "INSERT INTO players (player_id, name, active, category) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(player_id) DO UPDATE SET name = excluded.name, active = excluded.active, category = excluded.category",
        )?;
        for player in scraped {
            upsert
                .execute(params![player.player_id, player.name, player.active, player.category])
                .with_context(|| format!("Failed to upsert player {}", player.player_id))?;
            if known.contains(&player.player_id) {
                report.updated += 1;
            } else {
                report.added += 1;
            }
        }

        let mut delete = tx.prepare("DELETE FROM players WHERE player_id = ?1")?;
        for player_id in known.iter().filter(|id| !listed.contains(id.as_str())) {
            delete
                .execute(params![player_id])
                .with_context(|| format!("Failed to remove player {}", player_id))?;
            report.removed += 1;
        }
    }

    tx.commit().context("Failed to commit roster sync")?;
    Ok(report)
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<RosterEntry> {
    Ok(RosterEntry {
        player_id: row.get(0)?,
        name: row.get(1)?,
        active: row.get(2)?,
        category: row.get(3)?,
    })
}
