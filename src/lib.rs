pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod export;
pub mod extraction;
pub mod fetchers;
pub mod http;
pub mod pagination;
pub mod ranking;
pub mod rate_limiter;
pub mod report;
pub mod services;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use cli::Cli;
use log::warn;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::database::{players, DbConn, DbPool};
use crate::domain::{Period, PlayerId};
use crate::fetchers::HistoryScraper;
use crate::services::{
    run_cleanup, ExportService, ParticipationRunSummary, ParticipationService, RankingService, RosterService,
};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_ledger(config: &AppConfig) -> Result<DbPool> {
    database::create_pool(&config.ledger.database_path)
}

pub fn handle_roster() -> Result<()> {
    let config = AppConfig::new();
    let pool = open_ledger(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut conn = database::get_connection(&pool)?;
        let mut service = RosterService::new(&config.scraper)?;
        service.run(&mut conn).await.map(|_| ())
    })
}

pub fn handle_participations(players: &[PlayerId], periods: &[Period]) -> Result<()> {
    let config = AppConfig::new().with_periods(periods.to_vec());
    let pool = open_ledger(&config)?;
    let mut conn = database::get_connection(&pool)?;

    let summary = scrape_participations(&config, &mut conn, players)?;
    report::print_run_summary(&summary);
    Ok(())
}

fn scrape_participations(config: &AppConfig, conn: &mut DbConn, only: &[PlayerId]) -> Result<ParticipationRunSummary> {
    let player_ids = if only.is_empty() {
        players::list_ids(conn)?
    } else {
        only.to_vec()
    };
    if player_ids.is_empty() {
        bail!("No players to scrape, run `roster` first or pass --player");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let scraper = HistoryScraper::new(&config.scraper)?;
        let mut service = ParticipationService::new(scraper, config.run.clone());
        service.run(conn, &player_ids).await
    })
}

pub fn handle_cleanup() -> Result<()> {
    let config = AppConfig::new();
    let pool = open_ledger(&config)?;
    let mut conn = database::get_connection(&pool)?;

    let outcome = run_cleanup(&mut conn)?;
    println!("{} duplicates removed, {} participations kept", outcome.removed, outcome.kept.len());
    Ok(())
}

pub fn handle_ranking() -> Result<()> {
    let config = AppConfig::new();
    let pool = open_ledger(&config)?;
    let mut conn = database::get_connection(&pool)?;

    let ranking = RankingService::new().update_ranking(&mut conn)?;
    println!("{} monthly ranking entries", ranking.len());
    Ok(())
}

pub fn handle_podiums() -> Result<()> {
    let config = AppConfig::new();
    let pool = open_ledger(&config)?;
    let mut conn = database::get_connection(&pool)?;

    let podiums = RankingService::new().update_podiums(&mut conn)?;
    report::print_podiums(&podiums, &players::list_all(&mut conn)?);
    Ok(())
}

pub fn handle_export(output: Option<&Path>) -> Result<()> {
    let config = AppConfig::new();
    let pool = open_ledger(&config)?;
    let mut conn = database::get_connection(&pool)?;

    let output = resolve_output(&config, output);
    ExportService::new(config.run.current_period()).run(&mut conn, &output)?;
    Ok(())
}

/// Scrape, clean up, rank, podiums and export against the stored roster.
pub fn handle_refresh(periods: &[Period], output: Option<&Path>) -> Result<()> {
    let config = AppConfig::new().with_periods(periods.to_vec());
    let pool = open_ledger(&config)?;
    let mut conn = database::get_connection(&pool)?;

    let summary = scrape_participations(&config, &mut conn, &[])?;
    report::print_run_summary(&summary);
    if summary.failed_players == summary.players {
        warn!("Every player failed to scrape, rankings are rebuilt from the existing ledger");
    }

    let (_, podiums) = RankingService::new().run(&mut conn)?;
    report::print_podiums(&podiums, &players::list_all(&mut conn)?);

    let output = resolve_output(&config, output);
    ExportService::new(config.run.current_period()).run(&mut conn, &output)?;
    Ok(())
}

fn resolve_output(config: &AppConfig, output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| config.export.output_path.clone(), Path::to_path_buf)
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
