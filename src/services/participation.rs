use anyhow::Result;
use chrono::Local;
use log::{error, info, warn};

use crate::config::RunConfig;
use crate::database::{participations, DbConn};
use crate::domain::{ParticipationCandidate, ParticipationRecord, PlayerId, ScrapeProgress};
use crate::extraction::extract_player_history;
use crate::fetchers::RowSource;
use crate::ranking::{deduplicate, format_recorded_at, split_new_records, CleanupOutcome};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParticipationRunSummary {
    pub players: usize,
    pub failed_players: usize,
    pub appended: usize,
    pub skipped_known: usize,
    pub removed_duplicates: usize,
}

/// Scrapes every player's history and appends new participations to the ledger.
pub struct ParticipationService<S: RowSource> {
    source: S,
    run: RunConfig,
}

impl<S: RowSource> ParticipationService<S> {
    pub fn new(source: S, run: RunConfig) -> Self {
        Self { source, run }
    }

    /// Players are processed one at a time. A player whose page cannot be
    /// fetched contributes nothing and the batch moves on; ledger errors abort
    /// the run, keeping whatever was appended before.
    pub async fn run(&mut self, conn: &mut DbConn, player_ids: &[PlayerId]) -> Result<ParticipationRunSummary> {
        info!("=== Starting Participation Scraping ===\n");
        info!(
            "Target periods: {}",
            self.run.target_periods.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );

        let persisted = participations::existing_keys(conn)?;
        let mut progress = ScrapeProgress::new(player_ids.len());

        for (idx, player_id) in player_ids.iter().enumerate() {
            info!("[{}/{}] Processing player {}...", idx + 1, player_ids.len(), player_id);

            let candidates = match self.scrape_player(player_id).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    error!("Failed player {}: {:#}", player_id, e);
                    progress.record_failed();
                    continue;
                }
            };

            let records = Self::to_records(player_id, candidates);
            let (fresh, known) = split_new_records(records, &persisted);
            participations::append(conn, &fresh)?;

            if !fresh.is_empty() {
                info!("  → {} participations appended for {}", fresh.len(), player_id);
            }
            progress.record_scraped(fresh.len(), known.len());
        }

        let cleanup = run_cleanup(conn)?;

        info!("=== Participation Scraping Complete ===");
        Ok(ParticipationRunSummary {
            players: player_ids.len(),
            failed_players: progress.failed(),
            appended: progress.appended(),
            skipped_known: progress.skipped_known(),
            removed_duplicates: cleanup.removed,
        })
    }

    async fn scrape_player(&mut self, player_id: &str) -> Result<Vec<ParticipationCandidate>> {
        let rows = self.source.fetch_rows(player_id).await?;
        Ok(extract_player_history(&rows, player_id, &self.run.target_periods))
    }

    fn to_records(player_id: &str, candidates: Vec<ParticipationCandidate>) -> Vec<ParticipationRecord> {
        let recorded_at = format_recorded_at(Local::now().naive_local());
        candidates
            .into_iter()
            .map(|candidate| ParticipationRecord::from_candidate(player_id, candidate, &recorded_at))
            .collect()
    }
}

/// Collapses the participation ledger to one record per (player, tournament, category).
pub fn run_cleanup(conn: &mut DbConn) -> Result<CleanupOutcome> {
    info!("Cleaning up duplicate participations...");

    let records = participations::list_all(conn)?;
    let outcome = deduplicate(records);

    if outcome.undated > 0 {
        warn!("  {} participations kept without a parsable timestamp", outcome.undated);
    }

    if outcome.removed > 0 {
        participations::replace_all(conn, &outcome.kept)?;
    }

    info!(
        "  → Cleanup done: {} unique participations, {} duplicates removed",
        outcome.kept.len(),
        outcome.removed
    );
    Ok(outcome)
}
