use chrono::NaiveDate;
use tarifa_core::{PropertyIdentity, RecommendationReport, TarifaError};

use crate::Tarifa;

impl Tarifa {
    /// Recommend a price for every row of `property_name` checking in on `date`.
    ///
    /// Behavior: observations and events are fetched concurrently. Each row is
    /// adjusted from its own base price, so rows of different room types are
    /// never merged. Rows without a usable price are reported as warnings and
    /// events with an invalid schedule as `event_errors`; neither fails the call.
    ///
    /// # Errors
    /// Returns the first failing store read, tagged with the store name.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tarifa::recommendations_for_date", skip(self))
    )]
    pub async fn recommendations_for_date(
        &self,
        property_name: &str,
        date: NaiveDate,
    ) -> Result<RecommendationReport, TarifaError> {
        let (observations, events) =
            tokio::try_join!(self.fetch_observations(property_name), self.fetch_events())?;
        let rows = self.advisor.recommend_rows(date, &observations, &events);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = rows.recommendations.len(),
            warnings = rows.warnings.len(),
            "recommendations computed"
        );
        Ok(RecommendationReport {
            property: PropertyIdentity::new(property_name),
            date,
            recommendations: rows.recommendations,
            warnings: rows.warnings,
            event_errors: rows.event_errors,
        })
    }
}
