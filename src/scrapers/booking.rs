use crate::error::ListingError;
use crate::models::RawListing;
use crate::scrapers::extract::{deliver, first_attr, first_text, selector, Card};
use crate::scrapers::page::PageLoader;
use crate::scrapers::traits::SourceFetcher;
use crate::scrapers::types::SearchParams;
use crate::search::ListingSender;
use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

const SEARCH_URL: &str = "https://www.booking.com/searchresults.html";
const CARD: &str = r#"[data-testid="property-card"]"#;

/// Booking.com search results
pub struct BookingFetcher {
    loader: Arc<dyn PageLoader>,
}

impl BookingFetcher {
    pub fn new(loader: Arc<dyn PageLoader>) -> Self {
        Self { loader }
    }

    /// Build the results URL for a search
    pub fn search_url(params: &SearchParams) -> Result<Url> {
        let mut url = Url::parse(SEARCH_URL).context("Invalid Booking.com base URL")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("ss", params.city.name)
                .append_pair("checkin", &params.check_in.format("%Y-%m-%d").to_string())
                .append_pair("checkout", &params.check_out.format("%Y-%m-%d").to_string())
                .append_pair("group_adults", &params.adults.to_string())
                .append_pair("no_rooms", &params.rooms.to_string())
                .append_pair("group_children", &params.children.to_string());

            let mut filters = Vec::new();
            if let (Some(min), Some(max)) = (params.min_price, params.max_price) {
                filters.push(format!("price=BDT-{}-{}-1", min as i64, max as i64));
            }
            if let Some(stars) = params.star_rating {
                filters.push(format!("class={stars}"));
            }
            if !filters.is_empty() {
                query.append_pair("nflt", &filters.join(";"));
            }
        }
        Ok(url)
    }

    /// Parse every property card on a results page
    pub fn parse_results(html: &str, page_url: &Url) -> Result<Vec<Result<RawListing, ListingError>>> {
        let document = Html::parse_document(html);
        let card_selector = selector(CARD)?;
        let name = selector(r#"[data-testid="title"]"#)?;
        let price = selector(r#"[data-testid="price-and-discounted-price"]"#)?;
        let stars = selector(r#"[data-testid="rating-stars"] span"#)?;
        let image = selector(r#"[data-testid="image"]"#)?;
        let link = selector(r#"[data-testid="title-link"]"#)?;

        let cards = document
            .select(&card_selector)
            .map(|el| {
                Card {
                    name: first_text(&el, &name),
                    price: first_text(&el, &price),
                    stars: el.select(&stars).count(),
                    image: first_attr(&el, &image, "src"),
                    link: first_attr(&el, &link, "href"),
                }
                .into_listing("booking.com", page_url)
            })
            .collect();

        Ok(cards)
    }
}

#[async_trait]
impl SourceFetcher for BookingFetcher {
    async fn fetch(&self, params: &SearchParams, sink: ListingSender) -> Result<()> {
        info!("Starting Booking.com search for {}", params.city.name);

        let url = Self::search_url(params)?;
        let html = self
            .loader
            .load(&url, CARD)
            .await
            .context("Failed to load Booking.com results")?;

        let cards = Self::parse_results(&html, &url)?;
        if cards.is_empty() {
            warn!("No property cards found on Booking.com page");
        }

        deliver(self.source_name(), params, cards, &sink);
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "booking.com"
    }
}
