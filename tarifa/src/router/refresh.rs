use std::sync::Arc;
use std::time::Duration;

use tarifa_core::{Capability, SeriesReport, TarifaError};

use crate::Tarifa;
use crate::backoff::jitter_wait;

impl Tarifa {
    /// Number of observations the store currently holds for the property.
    ///
    /// A property the store has never seen counts as zero. Use the result as
    /// the baseline for [`Tarifa::await_new_observations`] before triggering a
    /// scrape.
    ///
    /// # Errors
    /// Returns the store error for any failure other than `NotFound`.
    pub async fn observation_count(&self, property_name: &str) -> Result<usize, TarifaError> {
        match self.fetch_observations(property_name).await {
            Ok(rows) => Ok(rows.len()),
            Err(TarifaError::NotFound { .. }) => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Poll the store until it holds more than `baseline` observations for the
    /// property, then return the fresh daily series.
    ///
    /// Behavior: polls up to `refresh.max_attempts` times, sleeping with
    /// exponential backoff plus jitter between polls. `NotFound` and store
    /// timeouts count as "not yet"; any other store error ends the wait.
    ///
    /// # Errors
    /// Returns `RequestTimeout` for the `refresh` capability once the attempts
    /// are exhausted, or the first non-transient store error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tarifa::await_new_observations", skip(self))
    )]
    pub async fn await_new_observations(
        &self,
        property_name: &str,
        baseline: usize,
    ) -> Result<SeriesReport, TarifaError> {
        let policy = self.cfg.refresh;
        for attempt in 0..policy.max_attempts {
            match self.fetch_observations(property_name).await {
                Ok(rows) if rows.len() > baseline => {
                    let series = self.series_for(property_name, &rows).await?;
                    return Ok(Arc::unwrap_or_clone(series).into_report());
                }
                Ok(_) | Err(TarifaError::NotFound { .. } | TarifaError::StoreTimeout { .. }) => {}
                Err(e) => return Err(e),
            }
            if attempt + 1 < policy.max_attempts {
                let wait = jitter_wait(policy.delay_ms(attempt), u32::from(policy.jitter_percent));
                #[cfg(feature = "tracing")]
                tracing::debug!(attempt, wait_ms = wait, "no new observations yet");
                tokio::time::sleep(Duration::from_millis(wait)).await;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            attempts = policy.max_attempts,
            "gave up waiting for new observations"
        );
        Err(TarifaError::request_timeout(Capability::Refresh.as_str()))
    }
}
