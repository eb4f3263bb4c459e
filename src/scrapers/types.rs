use crate::error::SearchError;
use crate::scrapers::cities::{self, City};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Search as submitted by a caller; everything but the city is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub city: String,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub adults: Option<u32>,
    #[serde(default)]
    pub children: Option<u32>,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub star_rating: Option<u8>,
}

impl SearchRequest {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    /// Fill in defaults relative to `today` and map the city.
    ///
    /// Fails with [`SearchError::NoCityMapping`] when the city is not one the
    /// sources can search.
    pub fn resolve(&self, today: NaiveDate) -> Result<SearchParams, SearchError> {
        let city = cities::lookup(&self.city).ok_or_else(|| SearchError::NoCityMapping {
            city: self.city.trim().to_string(),
        })?;

        let check_in = self.check_in.unwrap_or_else(|| next_day(today));
        let check_out = self.check_out.unwrap_or_else(|| next_day(check_in));

        Ok(SearchParams {
            city: *city,
            check_in,
            check_out,
            adults: self.adults.unwrap_or(2),
            children: self.children.unwrap_or(0),
            rooms: self.rooms.unwrap_or(1),
            min_price: self.min_price,
            max_price: self.max_price,
            star_rating: self.star_rating,
        })
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

/// Fully resolved search handed to every source fetcher
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub city: City,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub star_rating: Option<u8>,
}

impl SearchParams {
    /// Whether a listing passes the request's price and star filters.
    /// An unknown rating counts as zero stars.
    pub fn admits(&self, price: f64, rating: Option<f64>) -> bool {
        if let Some(min) = self.min_price {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if price > max {
                return false;
            }
        }
        if let Some(stars) = self.star_rating {
            if rating.unwrap_or(0.0) != f64::from(stars) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let params = SearchRequest::for_city("dhaka")
            .resolve(date(2026, 10, 15))
            .unwrap();

        assert_eq!(params.city.name, "Dhaka");
        assert_eq!(params.check_in, date(2026, 10, 16));
        assert_eq!(params.check_out, date(2026, 10, 17));
        assert_eq!((params.adults, params.children, params.rooms), (2, 0, 1));
        assert_eq!(params.star_rating, None);
    }

    #[test]
    fn test_check_out_follows_explicit_check_in() {
        let request = SearchRequest {
            check_in: Some(date(2026, 12, 31)),
            ..SearchRequest::for_city("Sylhet")
        };
        let params = request.resolve(date(2026, 10, 15)).unwrap();
        assert_eq!(params.check_out, date(2027, 1, 1));
    }

    #[test]
    fn test_unknown_city_is_rejected() {
        let err = SearchRequest::for_city("Atlantis")
            .resolve(date(2026, 10, 15))
            .unwrap_err();
        assert!(matches!(err, SearchError::NoCityMapping { ref city } if city == "Atlantis"));
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let request: SearchRequest = serde_json::from_str(r#"{"city": "Dhaka"}"#).unwrap();
        assert_eq!(request.city, "Dhaka");
        assert!(request.check_in.is_none());

        let request: SearchRequest = serde_json::from_str(
            r#"{"city": "Dhaka", "check_in": "2026-11-01", "min_price": 1000, "star_rating": 4}"#,
        )
        .unwrap();
        assert_eq!(request.check_in, Some(date(2026, 11, 1)));
        assert_eq!(request.min_price, Some(1000.0));
        assert_eq!(request.star_rating, Some(4));
    }

    #[test]
    fn test_admits_filters() {
        let mut params = SearchRequest::for_city("dhaka")
            .resolve(date(2026, 10, 15))
            .unwrap();
        assert!(params.admits(10.0, None));

        params.min_price = Some(100.0);
        params.max_price = Some(200.0);
        assert!(!params.admits(99.0, None));
        assert!(params.admits(100.0, None));
        assert!(params.admits(200.0, None));
        assert!(!params.admits(201.0, None));

        params.star_rating = Some(4);
        assert!(params.admits(150.0, Some(4.0)));
        assert!(!params.admits(150.0, Some(5.0)));
        assert!(!params.admits(150.0, None));
    }
}
