pub mod consolidation;
pub mod monthly;
pub mod podium;

pub use consolidation::{deduplicate, format_recorded_at, parse_recorded_at, split_new_records, CleanupOutcome};
pub use monthly::aggregate_monthly;
pub use podium::{calculate_podiums, compare_player_ids, standings, standings_order};
