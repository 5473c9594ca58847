use std::path::PathBuf;

use crate::domain::Period;

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub base_url: &'static str,
    pub club_id: u32,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    /// Pause between two page fetches, i.e. between players.
    pub request_delay_ms: u64,
    pub roster_max_pages: Option<usize>,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://tenisdemesaparatodos.com",
            club_id: 67,
            user_agent: "ClubRanking/1.0",
            timeout_secs: 90,
            request_delay_ms: 500,
            roster_max_pages: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LedgerSettings {
    pub database_path: String,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "club_ranking.db".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub output_path: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("datos.json"),
        }
    }
}

/// Months whose tournaments a participation run picks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub target_periods: Vec<Period>,
}

impl RunConfig {
    /// Uses `periods`, or the current and previous month when empty.
    pub fn with_periods(periods: Vec<Period>) -> Self {
        if periods.is_empty() {
            Self::default()
        } else {
            Self { target_periods: periods }
        }
    }

    pub fn current_period(&self) -> Period {
        self.target_periods.first().copied().unwrap_or_else(Period::current)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        let current = Period::current();
        Self {
            target_periods: vec![current, current.previous()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub ledger: LedgerSettings,
    pub export: ExportSettings,
    pub run: RunConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_periods(mut self, periods: Vec<Period>) -> Self {
        self.run = RunConfig::with_periods(periods);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_covers_current_and_previous_month() {
        let run = RunConfig::default();
        let current = Period::current();
        assert_eq!(run.target_periods, vec![current, current.previous()]);
        assert_eq!(run.current_period(), current);
    }

    #[test]
    fn test_explicit_periods_override_default() {
        let december = Period::new(12, 2025).unwrap();
        let run = RunConfig::with_periods(vec![december]);
        assert_eq!(run.target_periods, vec![december]);
        assert_eq!(RunConfig::with_periods(vec![]), RunConfig::default());
    }
}
