//! tarifa-core
//!
//! Core traits and algorithms shared across the tarifa ecosystem.
//!
//! - `connector`: the `StoreConnector` trait and capability role traits.
//! - `timeline`: turn raw scraped observations into canonical daily series.
//! - `proximity`: classify dates against the local event calendar.
//! - `advisor`: derive bounded price recommendations from that classification.
//!
//! The algorithms are synchronous and pure; only `connector` touches I/O, and it
//! leaves the runtime choice to the implementor.
#![warn(missing_docs)]

/// Repricing rules applied to individual observation rows.
pub mod advisor;
/// Store capability traits and the primary `StoreConnector` interface.
pub mod connector;
/// Event-day and day-after-event classification.
pub mod proximity;
/// Aggregation of raw observations into canonical daily series.
pub mod timeline;

pub use advisor::{RepricingAdvisor, RowRecommendations};
pub use connector::StoreConnector;
pub use proximity::{Proximity, classify, event_dates, partition_events, upcoming_events};
pub use timeline::{
    Completeness, ObservationExt, PropertySeries, Timeline, aggregate, compare_completeness,
    parse_price, resolve_identities,
};

pub use tarifa_types::*;
