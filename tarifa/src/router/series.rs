use std::sync::Arc;

use tarifa_core::{PropertySummary, SeriesReport, TarifaError};

use crate::Tarifa;

impl Tarifa {
    /// Canonical daily price series for one property.
    ///
    /// Behavior: fetches every observation of the property, resolves the
    /// representative record, and averages all parseable prices per check-in
    /// date. Records that could not contribute are listed in `warnings`.
    ///
    /// # Errors
    /// Returns `NotFound` when the store holds no observation for the property,
    /// or the store error (tagged with the store name) when the read fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tarifa::daily_series", skip(self))
    )]
    pub async fn daily_series(&self, property_name: &str) -> Result<SeriesReport, TarifaError> {
        let observations = self.fetch_observations(property_name).await?;
        let series = self.series_for(property_name, &observations).await?;
        Ok(Arc::unwrap_or_clone(series).into_report())
    }

    /// Headline numbers (average, min, max, nights counted) of the daily series.
    ///
    /// # Errors
    /// Same as [`Tarifa::daily_series`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tarifa::property_summary", skip(self))
    )]
    pub async fn property_summary(
        &self,
        property_name: &str,
    ) -> Result<PropertySummary, TarifaError> {
        let observations = self.fetch_observations(property_name).await?;
        let series = self.series_for(property_name, &observations).await?;
        Ok(series.summary())
    }
}
