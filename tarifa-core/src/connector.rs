use async_trait::async_trait;
use rust_decimal::Decimal;

pub use tarifa_types::StoreKey;
use tarifa_types::{Event, ObservationId, PriceObservation, PropertyRef, TarifaError};

/// Focused role trait for stores that serve raw price observations.
#[async_trait]
pub trait ObservationProvider: Send + Sync {
    /// Fetch every observation recorded for the referenced property.
    ///
    /// Order is not significant; the aggregator sorts its output.
    async fn list_observations(
        &self,
        property: &PropertyRef,
    ) -> Result<Vec<PriceObservation>, TarifaError>;
}

/// Focused role trait for stores that serve the local event list.
#[async_trait]
pub trait EventProvider: Send + Sync {
    /// Fetch events, optionally restricted to a location (case-insensitive).
    async fn list_events(&self, location: Option<&str>) -> Result<Vec<Event>, TarifaError>;
}

/// Focused role trait for stores that accept price write-backs.
#[async_trait]
pub trait PriceWriter: Send + Sync {
    /// Overwrite the stored price of a single observation.
    ///
    /// Writing the same price twice must leave the same stored state.
    async fn update_observation_price(
        &self,
        id: &ObservationId,
        price: Decimal,
    ) -> Result<(), TarifaError>;
}

/// Main trait implemented by observation stores.
///
/// Capabilities are advertised through the `as_*` accessors; a store that does
/// not support a role keeps the default `None`.
pub trait StoreConnector: Send + Sync {
    /// A stable identifier used in logs and error tags (e.g., "tarifa-supabase").
    fn name(&self) -> &'static str;

    /// Canonical store key constructed from the static name.
    fn key(&self) -> StoreKey {
        StoreKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// If implemented, returns a trait object for listing observations.
    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        None
    }

    /// If implemented, returns a trait object for listing events.
    fn as_event_provider(&self) -> Option<&dyn EventProvider> {
        None
    }

    /// If implemented, returns a trait object for writing prices back.
    fn as_price_writer(&self) -> Option<&dyn PriceWriter> {
        None
    }
}
