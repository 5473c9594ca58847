use anyhow::{Context, Result};
use log::{info, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{collapse_whitespace, parse_selector};
use crate::config::ScraperSettings;
use crate::domain::RosterEntry;
use crate::http::RateLimitedClient;
use crate::pagination::{build_paged_url, PageIterator, PaginationConfig};

const ACTIVE_ICON: &str = "icono_tilde.gif";
const NEXT_PAGE_TEXT: &str = "Siguiente";

/// Club category for a site rating.
pub fn category_for_rating(rating: f64) -> &'static str {
    const THRESHOLDS: [(f64, &str); 7] = [
        (979.0, "8º"),
        (1079.0, "7º"),
        (1199.0, "6º"),
        (1399.0, "5º"),
        (1599.0, "4º"),
        (1799.0, "3º"),
        (2099.0, "2º"),
    ];

    THRESHOLDS
        .iter()
        .find(|(max, _)| rating <= *max)
        .map_or("1º", |(_, category)| *category)
}

/// Reads member rows from one page of the club roster listing.
pub struct RosterParser {
    member_row_selector: Selector,
    cell_selector: Selector,
    link_selector: Selector,
    image_selector: Selector,
    player_code_regex: Regex,
}

impl RosterParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            member_row_selector: parse_selector("tr[bgcolor='#FFFFFF']")?,
            cell_selector: parse_selector("td")?,
            link_selector: parse_selector("a")?,
            image_selector: parse_selector("img")?,
            player_code_regex: Regex::new(r"codigo=(\d+)")
                .context("Failed to compile player code regex")?,
        })
    }

    pub fn parse(&self, html: &Html) -> Vec<RosterEntry> {
        html.select(&self.member_row_selector)
            .filter_map(|row| self.parse_member(row))
            .collect()
    }

    fn parse_member(&self, row: ElementRef) -> Option<RosterEntry> {
        let cells: Vec<ElementRef> = row.select(&self.cell_selector).collect();
        if cells.len() < 4 {
            return None;
        }

        let link = cells[1].select(&self.link_selector).next()?;
        let href = link.value().attr("href")?;
        let player_id = self.player_code_regex.captures(href)?.get(1)?.as_str().to_string();

        let active = cells[0]
            .select(&self.image_selector)
            .next()
            .and_then(|img| img.value().attr("src"))
            .is_some_and(|src| src.contains(ACTIVE_ICON));

        let rating = collapse_whitespace(&cells[3].text().collect::<String>())
            .parse::<f64>()
            .unwrap_or(0.0);

        Some(RosterEntry {
            player_id,
            name: collapse_whitespace(&link.text().collect::<String>()),
            active,
            category: category_for_rating(rating).to_string(),
        })
    }

    pub fn has_next_page(&self, html: &Html) -> bool {
        html.select(&self.link_selector)
            .any(|link| link.text().collect::<String>().trim() == NEXT_PAGE_TEXT)
    }
}

/// Collects the club roster across all listing pages
pub struct RosterScraper {
    client: RateLimitedClient,
    parser: RosterParser,
    listing_url: String,
    max_pages: Option<usize>,
}

impl RosterScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            client: RateLimitedClient::new(
                settings.user_agent,
                settings.timeout_secs,
                settings.request_delay_ms,
            )?,
            parser: RosterParser::new()?,
            listing_url: format!(
                "{}/jugadores.asp?codigo=&tipo=busqueda&buscar=&letra=&club={}&localidad=&provincia=todos",
                settings.base_url, settings.club_id
            ),
            max_pages: settings.roster_max_pages,
        })
    }

    /// Fails on any page error so that a partial roster never reaches the ledger.
    pub async fn scrape_roster(&mut self) -> Result<Vec<RosterEntry>> {
        let mut config = PaginationConfig::new();
        if let Some(max) = self.max_pages {
            config = config.with_max_pages(max);
        }
        let mut pages = PageIterator::new(config);
        let mut roster = Vec::new();

        loop {
            if pages.has_reached_max() {
                warn!("Stopped roster scraping at page limit");
                break;
            }

            let url = build_paged_url(&self.listing_url, "pagina", pages.current_page());
            info!("  → Roster page {}...", pages.current_page());

            let body = self
                .client
                .get_text(&url)
                .await
                .with_context(|| format!("Failed to fetch roster page {}", pages.current_page()))?;
            let (members, has_next) = {
                let html = Html::parse_document(&body);
                (self.parser.parse(&html), self.parser.has_next_page(&html))
            };

            info!("    {} members", members.len());
            roster.extend(members);

            if !has_next {
                break;
            }
            pages.advance();
        }

        info!("  → Found {} club members", roster.len());
        Ok(roster)
    }
}
