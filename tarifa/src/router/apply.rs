use std::future::Future;
use std::sync::Arc;

use tarifa_core::{ApplyReport, PriceRecommendation, TarifaError};

use crate::{RecommendationApplier, Tarifa};

impl Tarifa {
    /// Applier bound to this orchestrator's store, concurrency, and update timeout.
    #[must_use]
    pub fn applier(&self) -> RecommendationApplier {
        RecommendationApplier::from_config(Arc::clone(&self.store), &self.cfg)
    }

    /// Write accepted recommendations back to the store.
    ///
    /// Recommendations that would not change the stored price are skipped.
    /// Applying the same batch twice leaves the store in the same state.
    ///
    /// # Errors
    /// See [`RecommendationApplier::apply`].
    pub async fn accept_recommendations(
        &self,
        recommendations: &[PriceRecommendation],
    ) -> Result<ApplyReport, TarifaError> {
        self.applier().apply(recommendations).await
    }

    /// Write accepted recommendations back, giving up on pending updates once
    /// `cancel` resolves.
    ///
    /// # Errors
    /// See [`RecommendationApplier::apply_until`].
    pub async fn accept_recommendations_until<C>(
        &self,
        recommendations: &[PriceRecommendation],
        cancel: C,
    ) -> Result<ApplyReport, TarifaError>
    where
        C: Future<Output = ()>,
    {
        self.applier().apply_until(recommendations, cancel).await
    }
}
