//! Timeline aggregation.
//!
//! - `price`: tolerant parsing of scraped price text
//! - `identity`: completeness scoring and representative selection
//! - `aggregate`: grouping into sorted, deduplicated daily series

mod aggregate;
mod identity;
mod price;

use rust_decimal::Decimal;
use serde::Serialize;
use tarifa_types::{
    DailyPriceEntry, DailyStats, DataQualityWarning, IdentityAmbiguity, PriceObservation,
    PropertyIdentity, PropertySummary, SeriesReport,
};

pub use aggregate::aggregate;
pub use identity::{
    Completeness, ObservationExt, Resolution, compare_completeness, resolve_identities,
};
pub use price::parse_price;
pub(crate) use price::round_money;

/// Canonical series for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySeries {
    /// Property the series belongs to.
    pub identity: PropertyIdentity,
    /// Most complete raw record seen for the property.
    pub representative: PriceObservation,
    /// One entry per check-in date, ascending.
    pub entries: Vec<DailyPriceEntry>,
    /// Per-date statistics aligned with `entries`.
    pub stats: Vec<DailyStats>,
    /// Records of this property excluded during aggregation.
    pub warnings: Vec<DataQualityWarning>,
    /// Set when several records tied for representative.
    pub ambiguity: Option<IdentityAmbiguity>,
}

impl PropertySeries {
    /// Entry for `date`, if the series has one.
    #[must_use]
    pub fn entry(&self, date: chrono::NaiveDate) -> Option<&DailyPriceEntry> {
        self.entries
            .binary_search_by_key(&date, |e| e.date)
            .ok()
            .and_then(|i| self.entries.get(i))
    }

    /// Headline numbers: mean daily price, nights with a price, and the range.
    #[must_use]
    pub fn summary(&self) -> PropertySummary {
        let prices = self.entries.iter().map(|e| e.price);
        let total = prices.clone().try_fold(Decimal::ZERO, Decimal::checked_add);
        let average_price = match (total, self.entries.len()) {
            (_, 0) | (None, _) => None,
            (Some(sum), n) => Some(round_money(sum / Decimal::from(n))),
        };
        PropertySummary {
            property: self.identity.clone(),
            average_price,
            nights_counted: self.entries.len(),
            min: prices.clone().min(),
            max: prices.max(),
        }
    }

    /// Convert into the report envelope handed to callers.
    #[must_use]
    pub fn into_report(self) -> SeriesReport {
        SeriesReport {
            property: self.identity,
            entries: self.entries,
            stats: self.stats,
            warnings: self.warnings,
            ambiguities: self.ambiguity.into_iter().collect(),
        }
    }
}

/// Output of [`aggregate`]: every property's canonical series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    /// Series keyed by property, in name order.
    pub series: std::collections::BTreeMap<PropertyIdentity, PropertySeries>,
}

impl Timeline {
    /// Series for one property.
    #[must_use]
    pub fn get(&self, property: &PropertyIdentity) -> Option<&PropertySeries> {
        self.series.get(property)
    }

    /// Remove and return the series for one property.
    pub fn take(&mut self, property: &PropertyIdentity) -> Option<PropertySeries> {
        self.series.remove(property)
    }

    /// All data-quality warnings, grouped by property.
    pub fn warnings(&self) -> impl Iterator<Item = &DataQualityWarning> {
        self.series.values().flat_map(|s| s.warnings.iter())
    }

    /// All identity ambiguities, one per affected property.
    pub fn ambiguities(&self) -> impl Iterator<Item = &IdentityAmbiguity> {
        self.series.values().filter_map(|s| s.ambiguity.as_ref())
    }

    /// Whether no property produced a series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
