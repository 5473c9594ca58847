use anyhow::Result;

use club_ranking::cli::Command;
use club_ranking::{
    handle_cleanup, handle_completions, handle_export, handle_participations, handle_podiums, handle_ranking,
    handle_refresh, handle_roster, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Roster => handle_roster(),
        Command::Participations { players, periods } => handle_participations(players, periods),
        Command::Cleanup => handle_cleanup(),
        Command::Ranking => handle_ranking(),
        Command::Podiums => handle_podiums(),
        Command::Export { output } => handle_export(output.as_deref()),
        Command::Refresh { periods, output } => handle_refresh(periods, output.as_deref()),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
