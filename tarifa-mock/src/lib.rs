//! Mock observation stores for CI-safe tests and examples.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tarifa_core::connector::{EventProvider, ObservationProvider, PriceWriter, StoreConnector};
use tarifa_core::{Event, ObservationId, PriceObservation, PropertyRef, TarifaError};
use tokio::sync::Mutex;

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockStore, MockBehavior};

/// Mock store serving deterministic fixtures.
///
/// Prices written through [`PriceWriter`] replace the stored text, so a
/// later read reflects them. The property name `FAIL` yields a store error and
/// `TIMEOUT` sleeps briefly before answering.
pub struct MockStore {
    rows: Mutex<Vec<PriceObservation>>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// A store seeded with the fixture rows.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rows(fixtures::observations::all())
    }

    /// A store seeded with caller-provided rows.
    #[must_use]
    pub fn with_rows(rows: Vec<PriceObservation>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// The fixture rows, for building expectations in tests.
    #[must_use]
    pub fn fixture_observations() -> Vec<PriceObservation> {
        fixtures::observations::all()
    }

    /// The fixture events, including the one without a schedule.
    #[must_use]
    pub fn fixture_events() -> Vec<Event> {
        fixtures::events::all()
    }

    /// Append a row, as a finished scrape would.
    pub async fn insert(&self, row: PriceObservation) {
        self.rows.lock().await.push(row);
    }

    /// Current raw price text of one row.
    pub async fn price_of(&self, id: &ObservationId) -> Option<String> {
        let guard = self.rows.lock().await;
        guard
            .iter()
            .find(|r| &r.id == id)
            .and_then(|r| r.price.clone())
    }

    async fn maybe_fail_or_timeout(key: &str, capability: &'static str) -> Result<(), TarifaError> {
        match key {
            "FAIL" => Err(TarifaError::store(
                "tarifa-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl StoreConnector for MockStore {
    fn name(&self) -> &'static str {
        "tarifa-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }

    fn as_event_provider(&self) -> Option<&dyn EventProvider> {
        Some(self as &dyn EventProvider)
    }

    fn as_price_writer(&self) -> Option<&dyn PriceWriter> {
        Some(self as &dyn PriceWriter)
    }
}

#[async_trait]
impl ObservationProvider for MockStore {
    async fn list_observations(
        &self,
        property: &PropertyRef,
    ) -> Result<Vec<PriceObservation>, TarifaError> {
        let key = match property {
            PropertyRef::Id(id) | PropertyRef::Name(id) => id.as_str(),
        };
        Self::maybe_fail_or_timeout(key, "list-observations").await?;

        let guard = self.rows.lock().await;
        let rows: Vec<PriceObservation> = guard
            .iter()
            .filter(|r| match property {
                PropertyRef::Id(id) => r.property_id.as_deref() == Some(id.as_str()),
                PropertyRef::Name(name) => &r.property_name == name,
            })
            .cloned()
            .collect();
        if rows.is_empty() {
            return Err(TarifaError::not_found(format!("observations for {property}")));
        }
        Ok(rows)
    }
}

#[async_trait]
impl EventProvider for MockStore {
    async fn list_events(&self, location: Option<&str>) -> Result<Vec<Event>, TarifaError> {
        if let Some(loc) = location {
            Self::maybe_fail_or_timeout(loc, "list-events").await?;
        }
        Ok(fixtures::events::by_location(location))
    }
}

#[async_trait]
impl PriceWriter for MockStore {
    async fn update_observation_price(
        &self,
        id: &ObservationId,
        price: Decimal,
    ) -> Result<(), TarifaError> {
        let not_found = || TarifaError::not_found(format!("observation {id}"));
        let property_name = {
            let guard = self.rows.lock().await;
            guard
                .iter()
                .find(|r| &r.id == id)
                .map(|r| r.property_name.clone())
                .ok_or_else(not_found)?
        };
        // The lock is not held here, so a slow update never stalls the others.
        Self::maybe_fail_or_timeout(&property_name, "update-observation-price").await?;

        let mut guard = self.rows.lock().await;
        let row = guard.iter_mut().find(|r| &r.id == id).ok_or_else(not_found)?;
        row.price = Some(price.to_string());
        Ok(())
    }
}
