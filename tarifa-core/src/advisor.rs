use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tarifa_types::{
    Classification, DataQualityWarning, Event, ObservationId, PriceObservation,
    PriceRecommendation, TarifaError, UpliftPolicy,
};

use crate::proximity::{Proximity, classify, partition_events};
use crate::timeline::{parse_price, round_money};

/// Rule-based advisor turning event proximity into a bounded price uplift.
///
/// Outcomes are checked in order:
/// 1. the date is an event day: apply `event_today_percent`;
/// 2. the previous day is an event day: apply `event_yesterday_percent`;
/// 3. otherwise keep the base price.
///
/// The advisor holds no state beyond its policy; the same inputs always give
/// the same recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepricingAdvisor {
    policy: UpliftPolicy,
}

/// Per-row recommendations for one date, plus what had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowRecommendations {
    /// One recommendation per priced row, in input order.
    pub recommendations: Vec<PriceRecommendation>,
    /// Rows whose price was missing or did not parse.
    pub warnings: Vec<DataQualityWarning>,
    /// Events ignored because their schedule was invalid.
    pub event_errors: Vec<TarifaError>,
}

impl RepricingAdvisor {
    /// Build an advisor after validating the policy.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the tiers violate [`UpliftPolicy::validate`].
    pub fn new(policy: UpliftPolicy) -> Result<Self, TarifaError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// The uplift tiers in use.
    #[must_use]
    pub const fn policy(&self) -> UpliftPolicy {
        self.policy
    }

    /// Uplift percentage for a classification.
    #[must_use]
    pub const fn percent_for(&self, classification: Classification) -> Decimal {
        match classification {
            Classification::EventToday => self.policy.event_today_percent,
            Classification::EventYesterday => self.policy.event_yesterday_percent,
            Classification::Neutral => Decimal::ZERO,
        }
    }

    /// Recommend a price for one row.
    ///
    /// # Errors
    /// Returns `InvalidEvent` if any event has an unusable schedule.
    pub fn try_recommend(
        &self,
        observation_id: ObservationId,
        base_price: Decimal,
        date: NaiveDate,
        events: &[Event],
    ) -> Result<PriceRecommendation, TarifaError> {
        let proximity = classify(date, events)?;
        Ok(self.recommend_for(observation_id, base_price, &proximity, None))
    }

    /// Recommend a price for one row, treating the date as neutral when the
    /// event list cannot be classified.
    #[must_use]
    pub fn recommend(
        &self,
        observation_id: ObservationId,
        base_price: Decimal,
        date: NaiveDate,
        events: &[Event],
    ) -> PriceRecommendation {
        let proximity = classify(date, events).unwrap_or_else(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(%date, error = %_err, "classification failed; treating date as neutral");
            Proximity::neutral(date)
        });
        self.recommend_for(observation_id, base_price, &proximity, None)
    }

    /// Recommend a price given an already computed [`Proximity`].
    ///
    /// A zero or negative base price is left unchanged with a zero uplift.
    /// `percent_increase` is the uplift implied by the rounded prices, so it
    /// equals [`PriceRecommendation::implied_percent`]. It matches the tier
    /// unless cent rounding moves it; a base too small to change at all gets 0.
    #[must_use]
    pub fn recommend_for(
        &self,
        observation_id: ObservationId,
        base_price: Decimal,
        proximity: &Proximity,
        room_type: Option<String>,
    ) -> PriceRecommendation {
        let classification = proximity.classification();
        let tier = self.percent_for(classification);
        let uplifted = (base_price > Decimal::ZERO && !tier.is_zero())
            .then(|| {
                let factor = Decimal::ONE + tier / Decimal::ONE_HUNDRED;
                base_price.checked_mul(factor).map(round_money)
            })
            .flatten();
        let adjusted_price = uplifted
            .filter(|adjusted| *adjusted != base_price)
            .unwrap_or(base_price);
        let mut rec = PriceRecommendation {
            observation_id,
            base_price,
            adjusted_price,
            percent_increase: Decimal::ZERO,
            classification,
            room_type,
            event_id: proximity.triggering_event().map(|e| e.id.clone()),
        };
        // Cent rounding can shift the effective uplift away from the tier on
        // small bases; report what the two prices actually imply.
        rec.percent_increase = rec.implied_percent();
        rec
    }

    /// Run the advisor once per row checking in on `date`.
    ///
    /// Each row keeps its own base price and room type; rows are never merged.
    /// Rows with a missing or malformed price are skipped with a warning, and
    /// invalid events are dropped and reported instead of failing the batch.
    #[must_use]
    pub fn recommend_rows(
        &self,
        date: NaiveDate,
        observations: &[PriceObservation],
        events: &[Event],
    ) -> RowRecommendations {
        let (valid, event_errors) = partition_events(events.to_vec());
        let proximity = classify(date, &valid).unwrap_or_else(|_| Proximity::neutral(date));

        let mut out = RowRecommendations {
            event_errors,
            ..RowRecommendations::default()
        };
        for obs in observations.iter().filter(|o| o.checkin_date == Some(date)) {
            let Some(raw) = obs.price.as_deref() else {
                out.warnings.push(DataQualityWarning::MissingPrice {
                    observation_id: obs.id.clone(),
                });
                continue;
            };
            let Some(base) = parse_price(raw) else {
                #[cfg(feature = "tracing")]
                tracing::warn!(observation = %obs.id, raw, "skipping row with malformed price");
                out.warnings.push(DataQualityWarning::MalformedPrice {
                    observation_id: obs.id.clone(),
                    raw: raw.to_string(),
                });
                continue;
            };
            out.recommendations.push(self.recommend_for(
                obs.id.clone(),
                base,
                &proximity,
                obs.room_type.clone(),
            ));
        }
        out
    }
}
