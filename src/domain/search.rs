//! Hotel search: typed request parameters and the query they build.
//!
//! Parsing and building are separate steps. [`SearchParams::from_pairs`]
//! turns the raw query string pairs into typed values and rejects malformed
//! input; [`SearchQuery::build`] then maps the supplied parameters onto
//! constraints. Every store evaluates the same [`SearchQuery`], either
//! in-process via [`SearchQuery::matches`] or by translating it to SQL.

use std::fmt;

use super::Hotel;
use crate::error::BookingError;

/// Result ordering for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOption {
    /// Storage order.
    #[default]
    Unsorted,
    /// Highest star rating first.
    StarRating,
    /// Cheapest first.
    PricePerNightAsc,
    /// Most expensive first.
    PricePerNightDesc,
}

impl SortOption {
    fn parse(raw: &str) -> Result<Self, BookingError> {
        match raw {
            "" => Ok(Self::Unsorted),
            "starRating" => Ok(Self::StarRating),
            "pricePerNightAsc" => Ok(Self::PricePerNightAsc),
            "pricePerNightDesc" => Ok(Self::PricePerNightDesc),
            other => Err(BookingError::InvalidRequest(format!(
                "invalid sortOption: {other}"
            ))),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unsorted => "unsorted",
            Self::StarRating => "starRating",
            Self::PricePerNightAsc => "pricePerNightAsc",
            Self::PricePerNightDesc => "pricePerNightDesc",
        };
        f.write_str(s)
    }
}

/// Validated search request.
///
/// Empty values are treated as absent, matching what browser forms send
/// for untouched fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Free text matched against city or country.
    pub destination: Option<String>,
    /// Minimum adult capacity.
    pub adult_count: Option<u32>,
    /// Minimum child capacity.
    pub child_count: Option<u32>,
    /// Facilities the hotel must all have.
    pub facilities: Vec<String>,
    /// Accepted hotel types.
    pub types: Vec<String>,
    /// Accepted star ratings.
    pub stars: Vec<u8>,
    /// Upper bound on the nightly price.
    pub max_price: Option<f64>,
    /// Result ordering.
    pub sort: SortOption,
    /// 1-based page number.
    pub page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            destination: None,
            adult_count: None,
            child_count: None,
            facilities: Vec::new(),
            types: Vec::new(),
            stars: Vec::new(),
            max_price: None,
            sort: SortOption::Unsorted,
            page: 1,
        }
    }
}

impl SearchParams {
    /// Parses raw `key=value` query pairs.
    ///
    /// List parameters (`facilities`, `types`, `stars`) may repeat and may
    /// carry a trailing `[]`. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidRequest`] naming the offending
    /// parameter when a numeric value does not parse or is out of range,
    /// or when `sortOption` is not a known ordering.
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Result<Self, BookingError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let key = key.as_ref().trim_end_matches("[]");
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "destination" => params.destination = Some(value.to_string()),
                "adultCount" => params.adult_count = Some(parse_count(key, value)?),
                "childCount" => params.child_count = Some(parse_count(key, value)?),
                "facilities" => params.facilities.push(value.to_string()),
                "types" => params.types.push(value.to_string()),
                "stars" => params.stars.push(parse_star(value)?),
                "maxPrice" => params.max_price = Some(parse_price(value)?),
                "sortOption" => params.sort = SortOption::parse(value)?,
                "page" => params.page = parse_page(value)?,
                _ => {}
            }
        }

        Ok(params)
    }
}

fn parse_count(key: &str, value: &str) -> Result<u32, BookingError> {
    value
        .parse()
        .map_err(|_| BookingError::InvalidRequest(format!("invalid {key}: {value}")))
}

fn parse_star(value: &str) -> Result<u8, BookingError> {
    match value.parse::<u8>() {
        Ok(star @ 1..=5) => Ok(star),
        _ => Err(BookingError::InvalidRequest(format!(
            "invalid stars: {value}"
        ))),
    }
}

fn parse_price(value: &str) -> Result<f64, BookingError> {
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(BookingError::InvalidRequest(format!(
            "invalid maxPrice: {value}"
        ))),
    }
}

fn parse_page(value: &str) -> Result<u32, BookingError> {
    match value.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(BookingError::InvalidRequest(format!("invalid page: {value}"))),
    }
}

/// Predicate over hotels built from the supplied search parameters.
///
/// A `None` field places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Lowercased needle matched as a substring of city or country.
    pub destination: Option<String>,
    /// Hotel must accommodate at least this many adults.
    pub min_adults: Option<u32>,
    /// Hotel must accommodate at least this many children.
    pub min_children: Option<u32>,
    /// Hotel must offer every listed facility.
    pub all_facilities: Option<Vec<String>>,
    /// Hotel type must be one of these.
    pub type_in: Option<Vec<String>>,
    /// Star rating must be one of these.
    pub stars_in: Option<Vec<u8>>,
    /// Nightly price must not exceed this.
    pub max_price: Option<f64>,
}

impl SearchQuery {
    /// Builds the query from validated parameters.
    #[must_use]
    pub fn build(params: &SearchParams) -> Self {
        Self {
            destination: params.destination.as_deref().map(str::to_lowercase),
            min_adults: params.adult_count,
            min_children: params.child_count,
            all_facilities: non_empty(&params.facilities),
            type_in: non_empty(&params.types),
            stars_in: non_empty(&params.stars),
            max_price: params.max_price,
        }
    }

    /// Returns `true` if no constraint is set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluates the query against a single hotel.
    #[must_use]
    pub fn matches(&self, hotel: &Hotel) -> bool {
        if let Some(needle) = &self.destination
            && !hotel.city.to_lowercase().contains(needle.as_str())
            && !hotel.country.to_lowercase().contains(needle.as_str())
        {
            return false;
        }
        if self.min_adults.is_some_and(|min| hotel.adult_count < min) {
            return false;
        }
        if self.min_children.is_some_and(|min| hotel.child_count < min) {
            return false;
        }
        if let Some(required) = &self.all_facilities
            && !required.iter().all(|f| hotel.facilities.contains(f))
        {
            return false;
        }
        if let Some(types) = &self.type_in
            && !types.contains(&hotel.hotel_type)
        {
            return false;
        }
        if let Some(stars) = &self.stars_in
            && !stars.contains(&hotel.star_rating)
        {
            return false;
        }
        if self.max_price.is_some_and(|max| hotel.price_per_night > max) {
            return false;
        }
        true
    }
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}
