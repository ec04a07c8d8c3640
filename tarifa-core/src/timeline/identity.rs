use core::cmp::Ordering;
use std::collections::BTreeMap;

use tarifa_types::{IdentityAmbiguity, ObservationId, PriceObservation, PropertyIdentity};

use super::price::parse_price;

/// How much of a usable daily breakdown a raw record carries.
///
/// Ordered so that a more complete record compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Completeness {
    /// Only the property name is known.
    NameOnly = 0,
    /// A price is present, but not the full date/price/room triple.
    PriceOnly = 1,
    /// Check-in date, a parseable price, and a room type.
    DailyBreakdown = 2,
}

/// Derived views over a [`PriceObservation`].
pub trait ObservationExt {
    /// Score this record for representative selection.
    fn completeness(&self) -> Completeness;

    /// The logical property this record claims.
    fn identity(&self) -> PropertyIdentity;
}

impl ObservationExt for PriceObservation {
    fn completeness(&self) -> Completeness {
        let Some(raw) = self.price.as_deref() else {
            return Completeness::NameOnly;
        };
        if self.checkin_date.is_some() && self.room_type.is_some() && parse_price(raw).is_some() {
            Completeness::DailyBreakdown
        } else {
            Completeness::PriceOnly
        }
    }

    fn identity(&self) -> PropertyIdentity {
        PropertyIdentity::new(self.property_name.clone())
    }
}

/// Rank two records claiming the same property by completeness.
#[must_use]
pub fn compare_completeness(a: &PriceObservation, b: &PriceObservation) -> Ordering {
    a.completeness().cmp(&b.completeness())
}

/// Outcome of [`resolve_identities`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Most complete record per property.
    pub representatives: BTreeMap<PropertyIdentity, PriceObservation>,
    /// Properties whose winning score was shared by several records.
    pub ambiguities: Vec<IdentityAmbiguity>,
}

/// Pick the single most complete record per property name.
///
/// Names match exactly and case-sensitively. Among records with the highest
/// score the first seen is kept; if others share that score the property is
/// reported once in [`Resolution::ambiguities`]. No fields are merged across
/// records.
#[must_use]
pub fn resolve_identities(observations: &[PriceObservation]) -> Resolution {
    let mut best: BTreeMap<PropertyIdentity, (&PriceObservation, Completeness, Vec<ObservationId>)> =
        BTreeMap::new();

    for obs in observations {
        let score = obs.completeness();
        match best.get_mut(&obs.identity()) {
            None => {
                best.insert(obs.identity(), (obs, score, Vec::new()));
            }
            Some(slot) => match score.cmp(&slot.1) {
                Ordering::Greater => *slot = (obs, score, Vec::new()),
                Ordering::Equal => slot.2.push(obs.id.clone()),
                Ordering::Less => {}
            },
        }
    }

    let mut resolution = Resolution::default();
    for (identity, (kept, _score, tied)) in best {
        if !tied.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                property = %identity,
                kept = %kept.id,
                tied = tied.len(),
                "representative tie; keeping first seen"
            );
            resolution.ambiguities.push(IdentityAmbiguity {
                property: identity.clone(),
                kept: kept.id.clone(),
                tied,
            });
        }
        resolution.representatives.insert(identity, kept.clone());
    }
    resolution
}
