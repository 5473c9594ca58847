use std::collections::HashMap;

use colored::{ColoredString, Colorize};

use crate::domain::{Period, PodiumEntry, RosterEntry};
use crate::export::UNKNOWN_PLAYER_NAME;
use crate::services::ParticipationRunSummary;

/// Podium lines grouped by month, most recent month first.
pub fn podium_lines(podiums: &[PodiumEntry], roster: &[RosterEntry]) -> Vec<String> {
    let names: HashMap<&str, &str> = roster.iter().map(|p| (p.player_id.as_str(), p.name.as_str())).collect();

    let mut ordered: Vec<&PodiumEntry> = podiums.iter().collect();
    ordered.sort_by(|a, b| {
        (b.year, b.month)
            .cmp(&(a.year, a.month))
            .then_with(|| a.rank.cmp(&b.rank))
    });

    let mut lines = Vec::new();
    let mut last_period = None;
    for podium in ordered {
        let period = Period {
            month: podium.month,
            year: podium.year,
        };
        if last_period != Some(period) {
            lines.push(format!("{} {}", period.month_name(), period.year).bold().to_string());
            last_period = Some(period);
        }

        let name = names.get(podium.player_id.as_str()).copied().unwrap_or(UNKNOWN_PLAYER_NAME);
        lines.push(format!(
            "  {} {} ({}) - {} pts",
            medal(podium.rank),
            name,
            podium.player_id,
            podium.total_points
        ));
    }
    lines
}

fn medal(rank: u32) -> ColoredString {
    let label = format!("{}.", rank);
    match rank {
        1 => label.yellow().bold(),
        2 => label.white().bold(),
        3 => label.truecolor(205, 127, 50).bold(),
        _ => label.normal(),
    }
}

pub fn print_podiums(podiums: &[PodiumEntry], roster: &[RosterEntry]) {
    if podiums.is_empty() {
        println!("{}", "No podiums yet".dimmed());
        return;
    }
    for line in podium_lines(podiums, roster) {
        println!("{}", line);
    }
}

pub fn print_run_summary(summary: &ParticipationRunSummary) {
    println!(
        "{} players scraped, {} appended, {} already known, {} duplicates removed",
        summary.players.to_string().bold(),
        summary.appended.to_string().green(),
        summary.skipped_known,
        summary.removed_duplicates
    );
    if summary.failed_players > 0 {
        println!("{}", format!("{} players failed", summary.failed_players).red());
    }
}
