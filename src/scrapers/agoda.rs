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

const SEARCH_URL: &str = "https://www.agoda.com/search";
// Organic results follow the sort bar; sponsored blocks elsewhere are ignored
const CARD: &str = r#"div#sort-bar + div [data-selenium="hotel-item"]"#;

/// Agoda search results, addressed by Agoda's numeric city id
pub struct AgodaFetcher {
    loader: Arc<dyn PageLoader>,
}

impl AgodaFetcher {
    pub fn new(loader: Arc<dyn PageLoader>) -> Self {
        Self { loader }
    }

    pub fn search_url(params: &SearchParams) -> Result<Url> {
        let mut url = Url::parse(SEARCH_URL).context("Invalid Agoda base URL")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("city", params.city.agoda_code)
                .append_pair("checkIn", &params.check_in.format("%Y-%m-%d").to_string())
                .append_pair("checkOut", &params.check_out.format("%Y-%m-%d").to_string())
                .append_pair("adults", &params.adults.to_string())
                .append_pair("children", &params.children.to_string())
                .append_pair("rooms", &params.rooms.to_string())
                .append_pair("currency", "BDT");

            if let (Some(min), Some(max)) = (params.min_price, params.max_price) {
                query
                    .append_pair("PriceFrom", &(min as i64).to_string())
                    .append_pair("PriceTo", &(max as i64).to_string());
            }
            if let Some(stars) = params.star_rating {
                query.append_pair("hotelStarRating", &stars.to_string());
            }
        }
        Ok(url)
    }

    pub fn parse_results(html: &str, page_url: &Url) -> Result<Vec<Result<RawListing, ListingError>>> {
        let document = Html::parse_document(html);
        let card_selector = selector(CARD)?;
        let name = selector(r#"[data-selenium="hotel-name"]"#)?;
        let price = selector(r#"[data-selenium="display-price"]"#)?;
        let stars = selector(r#"[data-testid="rating-container"] svg"#)?;
        let image = selector(r#"[data-element-name="ssrweb-mainphoto"] img"#)?;
        let link = selector(r#"[data-element-name="property-card-content"]"#)?;

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
                .into_listing("agoda", page_url)
            })
            .collect();

        Ok(cards)
    }
}

#[async_trait]
impl SourceFetcher for AgodaFetcher {
    async fn fetch(&self, params: &SearchParams, sink: ListingSender) -> Result<()> {
        info!(
            "Starting Agoda search for {} (city {})",
            params.city.name, params.city.agoda_code
        );

        let url = Self::search_url(params)?;
        let html = self
            .loader
            .load(&url, CARD)
            .await
            .context("Failed to load Agoda results")?;

        let cards = Self::parse_results(&html, &url)?;
        if cards.is_empty() {
            warn!("No hotel cards found on Agoda page");
        }

        deliver(self.source_name(), params, cards, &sink);
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "agoda"
    }
}
