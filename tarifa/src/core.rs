use std::sync::Arc;
use std::time::Duration;

use tarifa_core::connector::{EventProvider, ObservationProvider, StoreConnector};
use tarifa_core::{
    CacheConfig, Capability, Event, PriceObservation, PropertyIdentity, PropertyRef,
    PropertySeries, RepricingAdvisor, RetryPolicy, TarifaConfig, TarifaError, UpliftPolicy,
    aggregate,
};

use crate::memo::{MemoStats, SeriesMemo};

/// Orchestrator exposing the dashboard operations over one observation store.
pub struct Tarifa {
    pub(crate) store: Arc<dyn StoreConnector>,
    pub(crate) cfg: TarifaConfig,
    pub(crate) advisor: RepricingAdvisor,
    pub(crate) memo: Option<SeriesMemo>,
}

/// Builder for constructing a `Tarifa` orchestrator with custom configuration.
pub struct TarifaBuilder {
    store: Option<Arc<dyn StoreConnector>>,
    cfg: TarifaConfig,
}

impl Default for TarifaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TarifaBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults: 20%/10% uplift tiers, 5s store and update timeouts, 8
    /// concurrent updates, a 30-day event horizon, no memoization.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            cfg: TarifaConfig::default(),
        }
    }

    /// Register the observation store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn StoreConnector>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the whole configuration, e.g. one loaded from a file.
    #[must_use]
    pub fn config(mut self, cfg: TarifaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the uplift tiers. Validated in [`TarifaBuilder::build`].
    #[must_use]
    pub const fn uplift_policy(mut self, policy: UpliftPolicy) -> Self {
        self.cfg.uplift = policy;
        self
    }

    /// Bound every store read.
    #[must_use]
    pub const fn store_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.store_timeout = timeout;
        self
    }

    /// Bound every individual price update.
    #[must_use]
    pub const fn update_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.update_timeout = timeout;
        self
    }

    /// Maximum number of price updates in flight at once.
    #[must_use]
    pub const fn apply_concurrency(mut self, n: usize) -> Self {
        self.cfg.apply_concurrency = n;
        self
    }

    /// Only consider events at this location (matched case-insensitively by the store).
    #[must_use]
    pub fn event_location(mut self, location: impl Into<String>) -> Self {
        self.cfg.event_location = Some(location.into());
        self
    }

    /// Look-ahead window for [`Tarifa::upcoming_events`].
    #[must_use]
    pub const fn upcoming_horizon_days(mut self, days: u32) -> Self {
        self.cfg.upcoming_horizon_days = days;
        self
    }

    /// Polling policy for [`Tarifa::await_new_observations`].
    #[must_use]
    pub const fn refresh_policy(mut self, policy: RetryPolicy) -> Self {
        self.cfg.refresh = policy;
        self
    }

    /// Memoize derived series keyed by the observation set.
    #[must_use]
    pub const fn memoize(mut self, cache: CacheConfig) -> Self {
        self.cfg.memoize = Some(cache);
        self
    }

    /// Build the `Tarifa` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no store was registered, the uplift tiers are
    /// invalid, the concurrency or memo capacity is zero, or the refresh policy
    /// is unusable.
    pub fn build(self) -> Result<Tarifa, TarifaError> {
        let store = self.store.ok_or_else(|| {
            TarifaError::InvalidArg(
                "no store registered; add one via with_store(...)".to_string(),
            )
        })?;
        let advisor = RepricingAdvisor::new(self.cfg.uplift)?;
        if self.cfg.apply_concurrency == 0 {
            return Err(TarifaError::InvalidArg(
                "apply_concurrency must be at least 1".to_string(),
            ));
        }
        validate_refresh(&self.cfg.refresh)?;
        let memo = match self.cfg.memoize {
            Some(c) if c.max_entries == 0 => {
                return Err(TarifaError::InvalidArg(
                    "memoize.max_entries must be at least 1".to_string(),
                ));
            }
            Some(c) => Some(SeriesMemo::new(&c)),
            None => None,
        };
        Ok(Tarifa {
            store,
            cfg: self.cfg,
            advisor,
            memo,
        })
    }
}

fn validate_refresh(p: &RetryPolicy) -> Result<(), TarifaError> {
    if p.max_attempts == 0 {
        return Err(TarifaError::InvalidArg(
            "refresh.max_attempts must be at least 1".to_string(),
        ));
    }
    if p.factor == 0 {
        return Err(TarifaError::InvalidArg(
            "refresh.factor must be at least 1".to_string(),
        ));
    }
    if p.jitter_percent > 100 {
        return Err(TarifaError::InvalidArg(
            "refresh.jitter_percent must be within 0..=100".to_string(),
        ));
    }
    if p.min_backoff_ms > p.max_backoff_ms {
        return Err(TarifaError::InvalidArg(
            "refresh.min_backoff_ms must not exceed max_backoff_ms".to_string(),
        ));
    }
    Ok(())
}

/// Attribute a store error to the store it came from.
///
/// Errors that already carry their origin or a precise meaning pass through.
pub fn tag_err(store: &str, e: TarifaError) -> TarifaError {
    match e {
        e @ (TarifaError::NotFound { .. }
        | TarifaError::StoreTimeout { .. }
        | TarifaError::Store { .. }
        | TarifaError::RequestTimeout { .. }
        | TarifaError::Cancelled) => e,
        other => TarifaError::Store {
            store: store.to_string(),
            msg: other.to_string(),
        },
    }
}

impl Tarifa {
    /// Start building a new `Tarifa` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use tarifa::{Tarifa, UpliftPolicy};
    ///
    /// let tarifa = Tarifa::builder()
    ///     .with_store(Arc::new(tarifa_mock::MockStore::new()))
    ///     .event_location("Madrid")
    ///     .build()?;
    /// let series = tarifa.daily_series("Grand Hotel").await?;
    /// ```
    #[must_use]
    pub fn builder() -> TarifaBuilder {
        TarifaBuilder::new()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &TarifaConfig {
        &self.cfg
    }

    /// The advisor used for recommendations.
    #[must_use]
    pub const fn advisor(&self) -> &RepricingAdvisor {
        &self.advisor
    }

    /// Hit/miss counters of the series memo, when memoization is enabled.
    #[must_use]
    pub fn memo_stats(&self) -> Option<MemoStats> {
        self.memo.as_ref().map(SeriesMemo::stats)
    }

    /// Wrap a store future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tarifa::core::store_call_with_timeout",
            skip(fut),
            fields(
                store = store_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn store_call_with_timeout<T, Fut>(
        store_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, TarifaError>
    where
        Fut: std::future::Future<Output = Result<T, TarifaError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(TarifaError::store_timeout(store_name, capability.as_str())))
    }

    pub(crate) fn observation_provider(&self) -> Result<&dyn ObservationProvider, TarifaError> {
        self.store
            .as_observation_provider()
            .ok_or_else(|| TarifaError::unsupported(Capability::ListObservations.as_str()))
    }

    pub(crate) fn event_provider(&self) -> Result<&dyn EventProvider, TarifaError> {
        self.store
            .as_event_provider()
            .ok_or_else(|| TarifaError::unsupported(Capability::ListEvents.as_str()))
    }

    /// Fetch all observations of one property, bounded by the store timeout.
    pub(crate) async fn fetch_observations(
        &self,
        property_name: &str,
    ) -> Result<Vec<PriceObservation>, TarifaError> {
        let provider = self.observation_provider()?;
        let property = PropertyRef::Name(property_name.to_string());
        let name = self.store.name();
        let rows = Self::store_call_with_timeout(
            name,
            Capability::ListObservations,
            self.cfg.store_timeout,
            provider.list_observations(&property),
        )
        .await
        .map_err(|e| tag_err(name, e))?;
        Ok(rows
            .into_iter()
            .filter(|r| r.property_name == property_name)
            .collect())
    }

    /// Fetch events for the configured location, bounded by the store timeout.
    pub(crate) async fn fetch_events(&self) -> Result<Vec<Event>, TarifaError> {
        let provider = self.event_provider()?;
        let name = self.store.name();
        Self::store_call_with_timeout(
            name,
            Capability::ListEvents,
            self.cfg.store_timeout,
            provider.list_events(self.cfg.event_location.as_deref()),
        )
        .await
        .map_err(|e| tag_err(name, e))
    }

    /// Canonical series for one property, served from the memo when the
    /// observation set is unchanged.
    pub(crate) async fn series_for(
        &self,
        property_name: &str,
        observations: &[PriceObservation],
    ) -> Result<Arc<PropertySeries>, TarifaError> {
        let identity = PropertyIdentity::new(property_name);
        let series = match &self.memo {
            Some(memo) => memo.get_or_compute(&identity, observations).await,
            None => aggregate(observations).take(&identity).map(Arc::new),
        };
        series.ok_or_else(|| TarifaError::not_found(format!("observations for {property_name}")))
    }
}
