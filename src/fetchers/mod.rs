pub mod history_scraper;
pub mod roster_scraper;

pub use history_scraper::{HistoryParser, HistoryScraper};
pub use roster_scraper::{category_for_rating, RosterParser, RosterScraper};

use anyhow::Result;
use scraper::Selector;

use crate::domain::RawRow;

/// Ordered history rows for one player, as shown on the results site.
#[allow(async_fn_in_trait)]
pub trait RowSource {
    async fn fetch_rows(&mut self, player_id: &str) -> Result<Vec<RawRow>>;
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector '{}': {:?}", css, e))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
