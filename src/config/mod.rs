pub mod settings;

pub use settings::{AppConfig, ExportSettings, LedgerSettings, RunConfig, ScraperSettings};
