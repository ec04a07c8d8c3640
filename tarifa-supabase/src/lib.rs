//! tarifa-supabase
//!
//! Observation store that implements `StoreConnector` on top of a PostgREST
//! endpoint (as exposed by Supabase). Serves price observations and events and
//! accepts price write-backs.
#![warn(missing_docs)]

mod config;
mod rows;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tarifa_core::connector::{
    EventProvider, ObservationProvider, PriceWriter, StoreConnector, StoreKey,
};
use tarifa_core::{Event, ObservationId, PriceObservation, PropertyRef};

pub use config::SupabaseConfig;
pub use tarifa_core::TarifaError;

use rows::{EventRow, ObservationRow, matches_location};

/// Public store type backed by `reqwest`.
pub struct SupabaseStore {
    config: SupabaseConfig,
    http: Client,
}

impl SupabaseStore {
    /// Static store key for logs and error tags.
    pub const KEY: StoreKey = StoreKey::new("tarifa-supabase");

    /// Build with a fresh `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the configuration is incomplete.
    pub fn new(config: SupabaseConfig) -> Result<Self, TarifaError> {
        Self::with_client(config, Client::new())
    }

    /// Build from an existing `reqwest::Client` (shared pools, custom TLS, proxies).
    ///
    /// # Errors
    /// Returns `InvalidArg` if the configuration is incomplete.
    pub fn with_client(config: SupabaseConfig, http: Client) -> Result<Self, TarifaError> {
        config.validate()?;
        Ok(Self { config, http })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.config.api_key)
            .bearer_auth(self.config.bearer())
            .header("Accept", "application/json")
    }

    fn transport_error(e: &reqwest::Error) -> TarifaError {
        TarifaError::store(Self::KEY.as_str(), e.to_string())
    }

    fn normalize_status(status: StatusCode, body: &str, what: &str) -> TarifaError {
        if status == StatusCode::NOT_FOUND {
            TarifaError::not_found(what.to_string())
        } else {
            TarifaError::store(
                Self::KEY.as_str(),
                format!("HTTP {}: {}", status.as_u16(), body.trim()),
            )
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        what: &str,
    ) -> Result<Vec<T>, TarifaError> {
        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| Self::transport_error(&e))?;
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = status.as_u16(), what, "postgrest request failed");
            return Err(Self::normalize_status(status, &body, what));
        }
        serde_json::from_str(&body)
            .map_err(|e| TarifaError::Data(format!("{what}: undecodable response: {e}")))
    }
}

impl StoreConnector for SupabaseStore {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Supabase"
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
impl ObservationProvider for SupabaseStore {
    async fn list_observations(
        &self,
        property: &PropertyRef,
    ) -> Result<Vec<PriceObservation>, TarifaError> {
        let (column, value, fallback_name) = match property {
            PropertyRef::Name(name) => (
                self.config.property_name_column.as_str(),
                name,
                Some(name.as_str()),
            ),
            PropertyRef::Id(id) => (self.config.property_id_column.as_str(), id, None),
        };
        let req = self
            .http
            .get(self.config.rest_url(&self.config.observations_table))
            .query(&[
                ("select", "*".to_string()),
                (column, format!("eq.{value}")),
                ("order", format!("{}.asc", self.config.order_column)),
            ]);
        let what = format!("observations for {property}");
        let rows: Vec<ObservationRow> = self.send_json(req, &what).await?;
        Ok(rows
            .into_iter()
            .filter_map(|r| r.into_observation(fallback_name))
            .collect())
    }
}

#[async_trait]
impl EventProvider for SupabaseStore {
    async fn list_events(&self, location: Option<&str>) -> Result<Vec<Event>, TarifaError> {
        let req = self
            .http
            .get(self.config.rest_url(&self.config.events_table))
            .query(&[("select", "*")]);
        let rows: Vec<EventRow> = self.send_json(req, "events").await?;
        Ok(rows
            .into_iter()
            .filter_map(EventRow::into_event)
            .filter(|e| location.is_none_or(|loc| matches_location(e, loc)))
            .collect())
    }
}

#[async_trait]
impl PriceWriter for SupabaseStore {
    async fn update_observation_price(
        &self,
        id: &ObservationId,
        price: Decimal,
    ) -> Result<(), TarifaError> {
        let req = self
            .http
            .patch(self.config.rest_url(&self.config.observations_table))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "price": price.to_string() }));
        let what = format!("observation {id}");
        let updated: Vec<serde_json::Value> = self.send_json(req, &what).await?;
        if updated.is_empty() {
            return Err(TarifaError::not_found(what));
        }
        Ok(())
    }
}
