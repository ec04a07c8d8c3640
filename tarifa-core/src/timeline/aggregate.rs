use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tarifa_types::{
    DailyPriceEntry, DailyStats, DataQualityWarning, PriceKind, PriceObservation,
    PropertyIdentity,
};

use super::identity::{ObservationExt, resolve_identities};
use super::price::{parse_price, round_money};
use super::{PropertySeries, Timeline};

/// Running totals for one `(property, date)` group.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    sum: Decimal,
    samples: usize,
    min: Decimal,
    max: Decimal,
    observed: bool,
}

impl Bucket {
    const fn new(price: Decimal, kind: PriceKind) -> Self {
        Self {
            sum: price,
            samples: 1,
            min: price,
            max: price,
            observed: matches!(kind, PriceKind::Observed),
        }
    }

    fn push(&mut self, price: Decimal, kind: PriceKind) -> bool {
        let Some(sum) = self.sum.checked_add(price) else {
            return false;
        };
        self.sum = sum;
        self.samples += 1;
        self.min = self.min.min(price);
        self.max = self.max.max(price);
        self.observed |= matches!(kind, PriceKind::Observed);
        true
    }

    fn finish(self, date: NaiveDate) -> (DailyPriceEntry, DailyStats) {
        // A single sample is passed through untouched.
        let mean = if self.samples == 1 {
            self.sum
        } else {
            round_money(self.sum / Decimal::from(self.samples))
        };
        let kind = if self.observed {
            PriceKind::Observed
        } else {
            PriceKind::Predicted
        };
        (
            DailyPriceEntry {
                date,
                price: mean,
                kind,
            },
            DailyStats {
                date,
                samples: self.samples,
                min: self.min,
                max: self.max,
                mean,
            },
        )
    }
}

#[derive(Default)]
struct Accumulator {
    days: BTreeMap<NaiveDate, Bucket>,
    warnings: Vec<DataQualityWarning>,
}

/// Fold raw observations into one canonical daily series per property.
///
/// - Observations are grouped by exact property name, then by check-in date.
/// - Each group's price is the mean of its parseable prices, rounded to cents.
/// - A group's kind is `Observed` if any contributor was observed.
/// - Unparseable prices, prices without a date, and dates without a price are
///   excluded and reported as warnings in input order. Name-only rows only
///   take part in identity resolution.
///
/// Duplicate `(property, date)` pairs anywhere in the input collapse into a
/// single entry. The output depends only on the input.
#[must_use]
pub fn aggregate(observations: &[PriceObservation]) -> Timeline {
    let resolution = resolve_identities(observations);
    let mut per_property: BTreeMap<PropertyIdentity, Accumulator> = BTreeMap::new();

    for obs in observations {
        let acc = per_property.entry(obs.identity()).or_default();
        match (obs.checkin_date, obs.price.as_deref()) {
            (Some(date), Some(raw)) => {
                let accepted = match (parse_price(raw), acc.days.get_mut(&date)) {
                    (None, _) => false,
                    (Some(price), Some(bucket)) => bucket.push(price, obs.kind),
                    (Some(price), None) => {
                        acc.days.insert(date, Bucket::new(price, obs.kind));
                        true
                    }
                };
                if !accepted {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(observation = %obs.id, raw, "dropping malformed price");
                    acc.warnings.push(DataQualityWarning::MalformedPrice {
                        observation_id: obs.id.clone(),
                        raw: raw.to_string(),
                    });
                }
            }
            (None, Some(_)) => acc.warnings.push(DataQualityWarning::MissingCheckinDate {
                observation_id: obs.id.clone(),
            }),
            (Some(_), None) => acc.warnings.push(DataQualityWarning::MissingPrice {
                observation_id: obs.id.clone(),
            }),
            (None, None) => {}
        }
    }

    let mut ambiguities: BTreeMap<_, _> = resolution
        .ambiguities
        .into_iter()
        .map(|a| (a.property.clone(), a))
        .collect();
    let mut representatives = resolution.representatives;

    let series = per_property
        .into_iter()
        .filter_map(|(identity, acc)| {
            let representative = representatives.remove(&identity)?;
            let (entries, stats) = acc
                .days
                .into_iter()
                .map(|(date, bucket)| bucket.finish(date))
                .unzip();
            let ambiguity = ambiguities.remove(&identity);
            Some((
                identity.clone(),
                PropertySeries {
                    identity,
                    representative,
                    entries,
                    stats,
                    warnings: acc.warnings,
                    ambiguity,
                },
            ))
        })
        .collect();

    Timeline { series }
}
