use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::Period;

#[derive(Parser, Debug)]
#[command(name = "club_ranking", author, version, about = "Club tournament results and monthly ranking")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Sync the club roster from the results site into the ledger
    Roster,
    /// Scrape player histories and append new participations
    Participations {
        /// Only scrape these player codes (defaults to the whole roster)
        #[arg(long = "player", value_name = "ID")]
        players: Vec<String>,
        /// Target month, repeatable (defaults to current and previous month)
        #[arg(long = "period", value_name = "MM/YYYY")]
        periods: Vec<Period>,
    },
    /// Remove duplicate participations, keeping the earliest recorded one
    Cleanup,
    /// Recompute the monthly ranking from the participation ledger
    Ranking,
    /// Recompute the monthly podiums and print them
    Podiums,
    /// Write the board snapshot JSON
    Export {
        /// Output file (defaults to datos.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run participations, cleanup, ranking, podiums and export in sequence
    Refresh {
        /// Target month, repeatable (defaults to current and previous month)
        #[arg(long = "period", value_name = "MM/YYYY")]
        periods: Vec<Period>,
        /// Output file (defaults to datos.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_repeated_periods_and_players() {
        let cli = Cli::try_parse_from([
            "club_ranking",
            "participations",
            "--player",
            "16118",
            "--period",
            "12/2025",
            "--period",
            "1/2026",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Participations {
                players: vec!["16118".to_string()],
                periods: vec![Period::new(12, 2025).unwrap(), Period::new(1, 2026).unwrap()],
            }
        );
    }

    #[test]
    fn test_rejects_invalid_period() {
        assert!(Cli::try_parse_from(["club_ranking", "refresh", "--period", "13/2025"]).is_err());
    }
}
