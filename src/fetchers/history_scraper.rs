use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{collapse_whitespace, parse_selector, RowSource};
use crate::config::ScraperSettings;
use crate::domain::RawRow;
use crate::http::RateLimitedClient;

const HEADER_COLOR: &str = "#FF6600";
const CHAMPION_COLOR: &str = "#FFEACA";

/// Turns a player's match-history page into ordered `RawRow`s.
pub struct HistoryParser {
    row_selector: Selector,
    tournament_cell_selector: Selector,
    link_selector: Selector,
    label_cell_selector: Selector,
    player_code_regex: Regex,
}

impl HistoryParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            row_selector: parse_selector("tr")?,
            tournament_cell_selector: parse_selector("td.tournament-name")?,
            link_selector: parse_selector("a[href]")?,
            label_cell_selector: parse_selector("td[colspan='10']")?,
            player_code_regex: Regex::new(r"codigo=(\d+)")
                .context("Failed to compile player code regex")?,
        })
    }

    pub fn parse(&self, html: &Html) -> Vec<RawRow> {
        html.select(&self.row_selector)
            .enumerate()
            .map(|(index, row)| self.parse_row(index, row))
            .collect()
    }

    fn parse_row(&self, index: usize, row: ElementRef) -> RawRow {
        let bgcolor = row.value().attr("bgcolor").unwrap_or_default();
        let tournament_cell = row.select(&self.tournament_cell_selector).next();

        RawRow {
            index,
            is_header: bgcolor.eq_ignore_ascii_case(HEADER_COLOR),
            is_champion_result: bgcolor.eq_ignore_ascii_case(CHAMPION_COLOR),
            player_codes: self.extract_player_codes(row),
            label: row
                .select(&self.label_cell_selector)
                .next()
                .map(element_text),
            header_text: tournament_cell.map(element_text),
            tournament_name: tournament_cell
                .and_then(|cell| cell.select(&self.link_selector).next())
                .map(element_text)
                .filter(|name| !name.is_empty()),
        }
    }

    fn extract_player_codes(&self, row: ElementRef) -> Vec<String> {
        row.select(&self.link_selector)
            .filter_map(|link| link.value().attr("href"))
            .filter_map(|href| self.player_code_regex.captures(href))
            .filter_map(|captures| captures.get(1))
            .map(|code| code.as_str().to_string())
            .collect()
    }
}

fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Fetches history pages from the results site
pub struct HistoryScraper {
    client: RateLimitedClient,
    parser: HistoryParser,
    base_url: String,
}

impl HistoryScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            client: RateLimitedClient::new(
                settings.user_agent,
                settings.timeout_secs,
                settings.request_delay_ms,
            )?,
            parser: HistoryParser::new()?,
            base_url: settings.base_url.to_string(),
        })
    }

    fn build_url(&self, player_id: &str) -> String {
        format!(
            "{}/partidos_xjugador.asp?codigo={}",
            self.base_url,
            urlencoding::encode(player_id)
        )
    }
}

impl RowSource for HistoryScraper {
    async fn fetch_rows(&mut self, player_id: &str) -> Result<Vec<RawRow>> {
        let url = self.build_url(player_id);
        debug!("Fetching history page {}", url);

        let body = self
            .client
            .get_text(&url)
            .await
            .with_context(|| format!("Failed to fetch history of player {}", player_id))?;

        let rows = self.parser.parse(&Html::parse_document(&body));
        info!("  → {} rows on history page of {}", rows.len(), player_id);
        Ok(rows)
    }
}
