//! Concurrent write-back of accepted recommendations.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tarifa_core::connector::StoreConnector;
use tarifa_core::{
    ApplyFailure, ApplyReport, Capability, PriceRecommendation, TarifaConfig, TarifaError,
};

use crate::core::{Tarifa, tag_err};

/// Writes recommended prices back to a store with bounded concurrency.
///
/// Each update is individually bounded by `update_timeout`. A failing update
/// is recorded in the report and never aborts the rest of the batch.
#[derive(Clone)]
pub struct RecommendationApplier {
    store: Arc<dyn StoreConnector>,
    concurrency: usize,
    update_timeout: Duration,
}

impl RecommendationApplier {
    /// Create an applier; a concurrency of zero is treated as one.
    #[must_use]
    pub fn new(store: Arc<dyn StoreConnector>, concurrency: usize, update_timeout: Duration) -> Self {
        Self {
            store,
            concurrency: concurrency.max(1),
            update_timeout,
        }
    }

    /// Create an applier using the concurrency and timeout from `cfg`.
    #[must_use]
    pub fn from_config(store: Arc<dyn StoreConnector>, cfg: &TarifaConfig) -> Self {
        Self::new(store, cfg.apply_concurrency, cfg.update_timeout)
    }

    /// Write every recommendation that changes the stored price.
    ///
    /// # Errors
    /// Returns `InvalidArg` if two recommendations target the same observation,
    /// or `Unsupported` if the store cannot write prices. Per-record failures
    /// are reported in [`ApplyReport::failures`].
    pub async fn apply(
        &self,
        recommendations: &[PriceRecommendation],
    ) -> Result<ApplyReport, TarifaError> {
        self.apply_until(recommendations, std::future::pending::<()>())
            .await
    }

    /// Like [`RecommendationApplier::apply`], but stops issuing and awaiting
    /// updates once `cancel` resolves.
    ///
    /// Updates that had not completed by then are reported as `Cancelled`;
    /// updates already acknowledged stay applied.
    ///
    /// # Errors
    /// Same as [`RecommendationApplier::apply`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tarifa::applier::apply",
            skip(self, recommendations, cancel),
            fields(
                store = self.store.name(),
                count = recommendations.len(),
                concurrency = self.concurrency,
            ),
        )
    )]
    pub async fn apply_until<C>(
        &self,
        recommendations: &[PriceRecommendation],
        cancel: C,
    ) -> Result<ApplyReport, TarifaError>
    where
        C: Future<Output = ()>,
    {
        let mut seen = HashSet::with_capacity(recommendations.len());
        for rec in recommendations {
            if !seen.insert(&rec.observation_id) {
                return Err(TarifaError::InvalidArg(format!(
                    "duplicate recommendation for observation {}",
                    rec.observation_id
                )));
            }
        }
        let writer = self.store.as_price_writer().ok_or_else(|| {
            TarifaError::unsupported(Capability::UpdateObservationPrice.as_str())
        })?;

        let (todo, unchanged): (Vec<&PriceRecommendation>, Vec<&PriceRecommendation>) =
            recommendations.iter().partition(|r| r.changes_price());
        let mut report = ApplyReport {
            skipped: unchanged.len(),
            ..ApplyReport::default()
        };
        if todo.is_empty() {
            return Ok(report);
        }

        let store_name = self.store.name();
        let timeout = self.update_timeout;
        let mut updates = futures::stream::iter(todo.iter().enumerate().map(|(idx, rec)| {
            let fut = writer.update_observation_price(&rec.observation_id, rec.adjusted_price);
            async move {
                let res = Tarifa::store_call_with_timeout(
                    store_name,
                    Capability::UpdateObservationPrice,
                    timeout,
                    fut,
                )
                .await
                .map_err(|e| tag_err(store_name, e));
                (idx, res)
            }
        }))
        .buffer_unordered(self.concurrency);

        let mut done = vec![false; todo.len()];
        let mut failed: Vec<(usize, TarifaError)> = Vec::new();
        tokio::pin!(cancel);
        loop {
            tokio::select! {
                biased;
                () = &mut cancel => {
                    #[cfg(feature = "tracing")]
                    tracing::info!("apply cancelled by caller");
                    break;
                }
                next = updates.next() => match next {
                    Some((idx, Ok(()))) => {
                        done[idx] = true;
                        report.applied += 1;
                    }
                    Some((idx, Err(e))) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            observation = %todo[idx].observation_id,
                            error = %e,
                            "price update failed"
                        );
                        done[idx] = true;
                        failed.push((idx, e));
                    }
                    None => break,
                },
            }
        }

        for (idx, finished) in done.iter().enumerate() {
            if !finished {
                failed.push((idx, TarifaError::Cancelled));
            }
        }
        failed.sort_by_key(|(idx, _)| *idx);
        report.failures = failed
            .into_iter()
            .map(|(idx, reason)| ApplyFailure {
                observation_id: todo[idx].observation_id.clone(),
                reason,
            })
            .collect();
        Ok(report)
    }
}
