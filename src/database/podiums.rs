use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::PodiumEntry;

pub fn list_all(conn: &mut DbConn) -> Result<Vec<PodiumEntry>> {
    let sql = "SELECT month, year, rank, player_id, total_points FROM podiums ORDER BY year, month, rank";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_podium_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read podiums")?;

    Ok(rows)
}

/// Regenerates the whole podium table from `podiums`.
pub fn replace_all(conn: &mut DbConn, podiums: &[PodiumEntry]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM podiums", [])
        .context("Failed to clear podiums")?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO podiums (month, year, rank, player_id, total_points) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for podium in podiums {
            stmt.execute(params![podium.month, podium.year, podium.rank, podium.player_id, podium.total_points])
                .context("Failed to insert podium entry")?;
        }
    }

    tx.commit().context("Failed to commit podiums")?;
    Ok(())
}

fn parse_podium_row(row: &rusqlite::Row) -> rusqlite::Result<PodiumEntry> {
    Ok(PodiumEntry {
        month: row.get(0)?,
        year: row.get(1)?,
        rank: row.get(2)?,
        player_id: row.get(3)?,
        total_points: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection};

    #[test]
    fn test_list_is_ordered_by_period_and_rank() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();

        let podiums = vec![
            PodiumEntry { month: 1, year: 2026, rank: 2, player_id: "B".to_string(), total_points: 40 },
            PodiumEntry { month: 1, year: 2026, rank: 1, player_id: "A".to_string(), total_points: 50 },
            PodiumEntry { month: 12, year: 2025, rank: 1, player_id: "C".to_string(), total_points: 20 },
        ];
        replace_all(&mut conn, &podiums).unwrap();

        let ids: Vec<String> = list_all(&mut conn).unwrap().into_iter().map(|p| p.player_id).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }
}
