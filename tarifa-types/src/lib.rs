//! Tarifa-specific data transfer objects and configuration primitives.
//!
//! Everything here is plain data: the algorithms that produce and consume these
//! types live in `tarifa-core` and the `tarifa` orchestrator.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
/// Unified error type for the Tarifa workspace.
pub mod error;
/// Price observations, events, daily series entries, and recommendations.
pub mod model;
mod reports;

pub use capability::Capability;
pub use config::{CacheConfig, RetryPolicy, TarifaConfig, UpliftPolicy};
pub use connector::StoreKey;
pub use error::TarifaError;
pub use model::{
    Classification, DailyPriceEntry, DailyStats, Event, EventId, EventSpan, ObservationId,
    PriceKind, PriceObservation, PriceRecommendation, PropertyIdentity, PropertyRef,
};
pub use reports::{
    ApplyFailure, ApplyReport, DataQualityWarning, IdentityAmbiguity, PropertySummary,
    RecommendationReport, SeriesReport,
};

pub use rust_decimal::Decimal;
