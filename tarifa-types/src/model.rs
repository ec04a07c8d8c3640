use core::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::TarifaError;

/// Store-assigned identifier of a single price observation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationId(pub String);

impl ObservationId {
    /// Construct an identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObservationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ObservationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for ObservationId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Identifier of an event as assigned by the event-discovery job.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    /// Construct an identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logical property keyed by its exact, case-sensitive name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyIdentity(pub String);

impl PropertyIdentity {
    /// Construct an identity from a property name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a store should locate the observations of one property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyRef {
    /// Store-specific property identifier.
    Id(String),
    /// Exact property name.
    Name(String),
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "property id {id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Whether a price was actually scraped or produced by an upstream forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceKind {
    /// Scraped from a booking site.
    #[default]
    Observed,
    /// Filled in by the scraper's forecast for dates it could not observe.
    Predicted,
}

/// One scraped quote for a room, check-in date, and property.
///
/// Every field except `id` and `property_name` may be missing on raw records.
/// `price` keeps the raw text exactly as scraped (e.g. `"$1,200"`); parsing is
/// the aggregator's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Store-assigned identifier.
    pub id: ObservationId,
    /// Store-specific property identifier, when the store has one.
    pub property_id: Option<String>,
    /// Property name; the identity key.
    pub property_name: String,
    /// Day the scrape ran.
    pub scrape_date: Option<NaiveDate>,
    /// Check-in date the quote applies to.
    pub checkin_date: Option<NaiveDate>,
    /// Room category as labelled by the booking site.
    pub room_type: Option<String>,
    /// Raw price text.
    pub price: Option<String>,
    /// Observed or predicted.
    #[serde(default)]
    pub kind: PriceKind,
    /// When the record was created.
    pub observed_at: Option<DateTime<Utc>>,
}

impl PriceObservation {
    /// Start a bare, name-only observation.
    pub fn new(id: impl Into<ObservationId>, property_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            property_id: None,
            property_name: property_name.into(),
            scrape_date: None,
            checkin_date: None,
            room_type: None,
            price: None,
            kind: PriceKind::Observed,
            observed_at: None,
        }
    }

    /// Set the check-in date.
    #[must_use]
    pub const fn with_checkin(mut self, date: NaiveDate) -> Self {
        self.checkin_date = Some(date);
        self
    }

    /// Set the raw price text.
    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Set the room type.
    #[must_use]
    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    /// Set the scrape date.
    #[must_use]
    pub const fn with_scrape_date(mut self, date: NaiveDate) -> Self {
        self.scrape_date = Some(date);
        self
    }

    /// Set the store-specific property identifier.
    #[must_use]
    pub fn with_property_id(mut self, property_id: impl Into<String>) -> Self {
        self.property_id = Some(property_id.into());
        self
    }

    /// Mark as observed or predicted.
    #[must_use]
    pub const fn with_kind(mut self, kind: PriceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the creation timestamp.
    #[must_use]
    pub const fn with_observed_at(mut self, ts: DateTime<Utc>) -> Self {
        self.observed_at = Some(ts);
        self
    }
}

/// Canonical price for one property on one date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyPriceEntry {
    /// Check-in date.
    pub date: NaiveDate,
    /// Mean of the contributing prices, rounded to two decimals. Never negative.
    pub price: Decimal,
    /// `Observed` if any contributing observation was observed.
    pub kind: PriceKind,
}

/// Summary statistics over the observations behind one [`DailyPriceEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyStats {
    /// Check-in date.
    pub date: NaiveDate,
    /// Number of parseable observations that contributed.
    pub samples: usize,
    /// Lowest contributing price.
    pub min: Decimal,
    /// Highest contributing price.
    pub max: Decimal,
    /// Rounded mean; equals the entry price.
    pub mean: Decimal,
}

/// A local event as produced by the event-discovery job.
///
/// Either `date` (single-day) or `start_date`..=`end_date` (ranged) must be set
/// for the event to be usable; an event with both covers the union.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Venue, if known.
    pub venue: Option<String>,
    /// Single event day.
    pub date: Option<NaiveDate>,
    /// First day of a ranged event.
    pub start_date: Option<NaiveDate>,
    /// Last day of a ranged event (inclusive).
    pub end_date: Option<NaiveDate>,
    /// City or area used for location filtering.
    pub location: Option<String>,
}

impl Event {
    /// A single-day event.
    pub fn single(id: impl Into<String>, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: EventId::new(id),
            name: name.into(),
            venue: None,
            date: Some(date),
            start_date: None,
            end_date: None,
            location: None,
        }
    }

    /// An event spanning `start..=end`.
    pub fn ranged(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: EventId::new(id),
            name: name.into(),
            venue: None,
            date: None,
            start_date: Some(start),
            end_date: Some(end),
            location: None,
        }
    }

    /// Set the venue.
    #[must_use]
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Set the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Validate the schedule and return the days it covers.
    ///
    /// A partial range (only one of `start_date`/`end_date`) is ignored when a
    /// single `date` is present.
    ///
    /// # Errors
    /// Returns `InvalidEvent` when the event has neither a single date nor a
    /// complete range, or when the range ends before it starts.
    pub fn span(&self) -> Result<EventSpan, TarifaError> {
        let range = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                return Err(TarifaError::invalid_event(
                    self.id.to_string(),
                    format!("range ends ({end}) before it starts ({start})"),
                ));
            }
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        };
        if self.date.is_none() && range.is_none() {
            return Err(TarifaError::invalid_event(
                self.id.to_string(),
                "neither a date nor a start/end range",
            ));
        }
        Ok(EventSpan {
            single: self.date,
            range,
        })
    }
}

/// Validated set of days covered by an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventSpan {
    single: Option<NaiveDate>,
    range: Option<(NaiveDate, NaiveDate)>,
}

impl EventSpan {
    /// Whether `date` falls on the single day or inside the inclusive range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.single == Some(date)
            || self
                .range
                .is_some_and(|(start, end)| start <= date && date <= end)
    }

    /// Earliest covered day.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        match (self.single, self.range) {
            (Some(d), Some((start, _))) => d.min(start),
            (Some(d), None) => d,
            (None, Some((start, _))) => start,
            (None, None) => NaiveDate::MIN,
        }
    }

    /// Latest covered day.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        match (self.single, self.range) {
            (Some(d), Some((_, end))) => d.max(end),
            (Some(d), None) => d,
            (None, Some((_, end))) => end,
            (None, None) => NaiveDate::MIN,
        }
    }

    /// Whether any covered day lies in `from..=to`.
    #[must_use]
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        let single_hit = self.single.is_some_and(|d| from <= d && d <= to);
        let range_hit = self
            .range
            .is_some_and(|(start, end)| start <= to && from <= end);
        single_hit || range_hit
    }
}

/// Proximity of a date to local events, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    /// The date itself falls inside an event.
    EventToday,
    /// The previous calendar day falls inside an event.
    EventYesterday,
    /// Neither.
    Neutral,
}

impl Classification {
    /// Stable identifier for logs and wire payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EventToday => "eventToday",
            Self::EventYesterday => "eventYesterday",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested price for a single observation row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRecommendation {
    /// Row the recommendation applies to.
    pub observation_id: ObservationId,
    /// Current price of the row.
    pub base_price: Decimal,
    /// `round(base_price * (1 + tier / 100), 2)`, or `base_price` when no tier applies.
    pub adjusted_price: Decimal,
    /// Uplift implied by the two prices, at most one decimal place.
    pub percent_increase: Decimal,
    /// Which tier produced the uplift.
    pub classification: Classification,
    /// Room type of the row, carried for display.
    pub room_type: Option<String>,
    /// Event that triggered the uplift, if any.
    pub event_id: Option<EventId>,
}

impl PriceRecommendation {
    /// Whether applying this recommendation would change the stored price.
    #[must_use]
    pub fn changes_price(&self) -> bool {
        self.adjusted_price != self.base_price
    }

    /// Percentage recomputed from `(base_price, adjusted_price)`, rounded to one decimal.
    ///
    /// Returns zero for a zero base price.
    #[must_use]
    pub fn implied_percent(&self) -> Decimal {
        if self.base_price.is_zero() {
            return Decimal::ZERO;
        }
        ((self.adjusted_price - self.base_price) * Decimal::ONE_HUNDRED / self.base_price)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}
