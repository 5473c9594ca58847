use anyhow::Result;
use log::info;

use crate::database::{participations, podiums, rankings, DbConn};
use crate::domain::{MonthlyRankingEntry, PodiumEntry};
use crate::ranking::{aggregate_monthly, calculate_podiums};

/// Rebuilds the derived ranking and podium tables from the participation ledger.
pub struct RankingService;

impl RankingService {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, conn: &mut DbConn) -> Result<(Vec<MonthlyRankingEntry>, Vec<PodiumEntry>)> {
        let ranking = self.update_ranking(conn)?;
        let podiums = self.update_podiums(conn)?;
        Ok((ranking, podiums))
    }

    pub fn update_ranking(&self, conn: &mut DbConn) -> Result<Vec<MonthlyRankingEntry>> {
        info!("Recomputing monthly ranking...");

        let records = participations::list_all(conn)?;
        let ranking = aggregate_monthly(&records);
        rankings::replace_all(conn, &ranking)?;

        info!(
            "  → {} ranking entries from {} participations",
            ranking.len(),
            records.len()
        );
        Ok(ranking)
    }

    /// Reads the persisted ranking, so run it after `update_ranking`.
    pub fn update_podiums(&self, conn: &mut DbConn) -> Result<Vec<PodiumEntry>> {
        info!("Recomputing monthly podiums...");

        let ranking = rankings::list_all(conn)?;
        let podium_entries = calculate_podiums(&ranking);
        podiums::replace_all(conn, &podium_entries)?;

        info!("  → {} podium places", podium_entries.len());
        Ok(podium_entries)
    }
}

impl Default for RankingService {
    fn default() -> Self {
        Self::new()
    }
}
