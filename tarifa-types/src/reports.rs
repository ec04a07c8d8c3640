//! Report envelopes produced by the aggregator, advisor, and applier.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::TarifaError;
use crate::model::{
    DailyPriceEntry, DailyStats, ObservationId, PriceRecommendation, PropertyIdentity,
};

/// Recoverable, record-local data problem found while aggregating.
///
/// The offending record is excluded from the derived output; the warning is
/// surfaced so callers can show it next to the series.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DataQualityWarning {
    /// The price text did not parse as a decimal after stripping.
    #[error("observation {observation_id}: malformed price {raw:?}")]
    MalformedPrice {
        /// Offending record.
        observation_id: ObservationId,
        /// Price text exactly as stored.
        raw: String,
    },

    /// The record carries a price but no check-in date.
    #[error("observation {observation_id}: price without check-in date")]
    MissingCheckinDate {
        /// Offending record.
        observation_id: ObservationId,
    },

    /// The record carries a check-in date but no price.
    #[error("observation {observation_id}: check-in date without price")]
    MissingPrice {
        /// Offending record.
        observation_id: ObservationId,
    },
}

impl DataQualityWarning {
    /// Identifier of the record the warning is about.
    #[must_use]
    pub const fn observation_id(&self) -> &ObservationId {
        match self {
            Self::MalformedPrice { observation_id, .. }
            | Self::MissingCheckinDate { observation_id }
            | Self::MissingPrice { observation_id } => observation_id,
        }
    }
}

/// Several records tied for the most complete representative of one property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityAmbiguity {
    /// Property whose representative was ambiguous.
    pub property: PropertyIdentity,
    /// Record that was kept (the first seen among the tied).
    pub kept: ObservationId,
    /// The other records sharing the winning score, in input order.
    pub tied: Vec<ObservationId>,
}

/// Canonical daily series for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesReport {
    /// Property the series belongs to.
    pub property: PropertyIdentity,
    /// One entry per check-in date, ascending.
    pub entries: Vec<DailyPriceEntry>,
    /// Per-date statistics aligned with `entries`.
    pub stats: Vec<DailyStats>,
    /// Records dropped during aggregation.
    pub warnings: Vec<DataQualityWarning>,
    /// Representative ties found while resolving the identity.
    pub ambiguities: Vec<IdentityAmbiguity>,
}

/// Per-row recommendations for one property and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// Property the rows belong to.
    pub property: PropertyIdentity,
    /// Check-in date that was evaluated.
    pub date: NaiveDate,
    /// One recommendation per priced row.
    pub recommendations: Vec<PriceRecommendation>,
    /// Rows skipped because their price did not parse.
    pub warnings: Vec<DataQualityWarning>,
    /// Events ignored because their schedule was invalid.
    pub event_errors: Vec<TarifaError>,
}

/// A single recommendation that could not be written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyFailure {
    /// Row whose update failed.
    pub observation_id: ObservationId,
    /// Why.
    pub reason: TarifaError,
}

/// Outcome of writing a batch of recommendations back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Updates the store acknowledged.
    pub applied: usize,
    /// Recommendations that would not change the stored price.
    pub skipped: usize,
    /// Per-record failures; never abort the batch.
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    /// True when every non-trivial recommendation was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Headline numbers for a property's canonical series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySummary {
    /// Property summarized.
    pub property: PropertyIdentity,
    /// Mean of the daily prices, rounded to two decimals; `None` for an empty series.
    pub average_price: Option<Decimal>,
    /// Number of dates with an entry.
    pub nights_counted: usize,
    /// Lowest daily price.
    pub min: Option<Decimal>,
    /// Highest daily price.
    pub max: Option<Decimal>,
}
