use anyhow::{bail, Result};
use log::info;

use crate::config::ScraperSettings;
use crate::database::{players, DbConn, RosterSyncReport};
use crate::domain::RosterEntry;
use crate::fetchers::RosterScraper;

pub struct RosterService {
    scraper: RosterScraper,
}

impl RosterService {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            scraper: RosterScraper::new(settings)?,
        })
    }

    pub async fn run(&mut self, conn: &mut DbConn) -> Result<RosterSyncReport> {
        info!("=== Starting Roster Sync ===\n");

        let roster = self.scraper.scrape_roster().await?;
        let report = apply_roster(conn, &roster)?;

        info!(
            "  → Roster synced: {} added, {} updated, {} removed",
            report.added, report.updated, report.removed
        );
        info!("=== Roster Sync Complete ===");
        Ok(report)
    }
}

/// Refuses an empty listing, which would otherwise wipe the roster.
pub fn apply_roster(conn: &mut DbConn, roster: &[RosterEntry]) -> Result<RosterSyncReport> {
    if roster.is_empty() {
        bail!("Roster listing returned no members, keeping the stored roster");
    }
    players::sync(conn, roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection};

    fn member(id: &str, active: bool) -> RosterEntry {
        RosterEntry {
            player_id: id.to_string(),
            name: format!("Jugador {}", id),
            active,
            category: "5º".to_string(),
        }
    }

    #[test]
    fn test_apply_roster_syncs_players() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();

        apply_roster(&mut conn, &[member("1", true), member("2", true)]).unwrap();
        let report = apply_roster(&mut conn, &[member("2", false), member("3", true)]).unwrap();

        assert_eq!(report, RosterSyncReport { added: 1, updated: 1, removed: 1 });
        let stored = players::list_all(&mut conn).unwrap();
        assert_eq!(stored.len(), 2);
        assert!(!stored.iter().find(|p| p.player_id == "2").unwrap().active);
    }

    #[test]
    fn test_empty_listing_is_rejected() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        apply_roster(&mut conn, &[member("1", true)]).unwrap();

        assert!(apply_roster(&mut conn, &[]).is_err());
        assert_eq!(players::list_ids(&mut conn).unwrap(), vec!["1".to_string()]);
    }
}
