//! Tarifa turns scraped hotel price observations into a canonical daily price
//! series per property and recommends event-driven price adjustments.
//!
//! Overview
//! - Reads observations and events through the `tarifa_core` store contracts.
//! - Resolves one representative record per property and averages every
//!   parseable price per check-in date; dropped records surface as warnings.
//! - Classifies dates against the local event calendar (event day, day after
//!   an event, neutral) and applies the configured uplift tiers per row.
//! - Writes accepted recommendations back with bounded concurrency and a
//!   per-update timeout, reporting failures per record.
//!
//! Key behaviors and trade-offs
//! - Store reads are bounded by `store_timeout`; a slow store yields
//!   `StoreTimeout` rather than a hung dashboard.
//! - Rows are never merged for recommendations: each room type keeps its own
//!   base price, so one date may yield several recommendations.
//! - Memoization (opt-in) keys derived series by the exact observation set, so
//!   it never serves a series older than the data it was computed from.
//! - Refresh polling uses exponential backoff with jitter and gives up with
//!   `RequestTimeout` once the attempt budget is spent.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use tarifa::Tarifa;
//!
//! let tarifa = Tarifa::builder()
//!     .with_store(Arc::new(tarifa_mock::MockStore::new()))
//!     .event_location("Madrid")
//!     .build()?;
//!
//! let series = tarifa.daily_series("Grand Hotel").await?;
//! let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
//! let report = tarifa.recommendations_for_date("Grand Hotel", date).await?;
//! let applied = tarifa.accept_recommendations(&report.recommendations).await?;
//! ```
//!
//! See `tarifa/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

mod applier;
mod backoff;
pub(crate) mod core;
mod memo;
mod router;

pub use applier::RecommendationApplier;
pub use backoff::jitter_wait;
pub use core::{Tarifa, TarifaBuilder, tag_err};
pub use memo::MemoStats;

// Re-export core types for convenience
pub use tarifa_core::{
    ApplyFailure, ApplyReport, CacheConfig, Capability, Classification, DailyPriceEntry,
    DailyStats, DataQualityWarning, Decimal, Event, EventId, IdentityAmbiguity, ObservationId,
    PriceKind, PriceObservation, PriceRecommendation, PropertyIdentity, PropertyRef,
    PropertySummary, RecommendationReport, RepricingAdvisor, RetryPolicy, SeriesReport,
    StoreConnector, TarifaConfig, TarifaError, UpliftPolicy,
};
