pub mod export;
pub mod participation;
pub mod ranking;
pub mod roster;

pub use export::ExportService;
pub use participation::{run_cleanup, ParticipationRunSummary, ParticipationService};
pub use ranking::RankingService;
pub use roster::{apply_roster, RosterService};
