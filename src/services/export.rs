use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use log::info;

use crate::database::{players, podiums, rankings, DbConn};
use crate::domain::Period;
use crate::export::{build_snapshot, BoardSnapshot};

pub struct ExportService {
    current: Period,
}

impl ExportService {
    pub fn new(current: Period) -> Self {
        Self { current }
    }

    pub fn snapshot(&self, conn: &mut DbConn) -> Result<BoardSnapshot> {
        let roster = players::list_all(conn)?;
        let ranking = rankings::list_all(conn)?;
        let podium_entries = podiums::list_all(conn)?;

        Ok(build_snapshot(&roster, &ranking, &podium_entries, self.current, Local::now()))
    }

    pub fn run(&self, conn: &mut DbConn, output: &Path) -> Result<BoardSnapshot> {
        info!("Exporting board snapshot for {}...", self.current);

        let snapshot = self.snapshot(conn)?;
        write_json(output, &snapshot)?;

        info!(
            "  → Wrote {} ({} ranked this month, {} active players)",
            output.display(),
            snapshot.current_ranking.len(),
            snapshot.players.len()
        );
        Ok(snapshot)
    }
}

fn write_json(path: &Path, snapshot: &BoardSnapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create export directory")?;
    }
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize board snapshot")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection};
    use crate::domain::{MonthlyRankingEntry, RosterEntry};

    #[test]
    fn test_writes_snapshot_file() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        players::sync(
            &mut conn,
            &[RosterEntry {
                player_id: "16118".to_string(),
                name: "Ana".to_string(),
                active: true,
                category: "5º".to_string(),
            }],
        )
        .unwrap();
        rankings::replace_all(
            &mut conn,
            &[MonthlyRankingEntry {
                player_id: "16118".to_string(),
                month: 1,
                year: 2026,
                total_points: 22,
            }],
        )
        .unwrap();

        let output = std::env::temp_dir().join(format!("club_ranking_export_{}.json", std::process::id()));
        let service = ExportService::new(Period::new(1, 2026).unwrap());
        let snapshot = service.run(&mut conn, &output).unwrap();

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        fs::remove_file(&output).unwrap();

        assert_eq!(snapshot.current_ranking[0].name, "Ana");
        assert_eq!(written["monthName"], "Enero");
        assert_eq!(written["currentRanking"][0]["totalPoints"], 22);
        assert_eq!(written["players"].as_array().unwrap().len(), 1);
    }
}
