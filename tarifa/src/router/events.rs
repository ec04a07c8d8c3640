use std::collections::BTreeSet;

use chrono::NaiveDate;
use tarifa_core::{Event, TarifaError, event_dates, upcoming_events};

use crate::Tarifa;

impl Tarifa {
    /// Events overlapping the configured horizon starting at `today`, ordered by first day.
    ///
    /// # Errors
    /// Returns the store error when the event list cannot be read.
    pub async fn upcoming_events(&self, today: NaiveDate) -> Result<Vec<Event>, TarifaError> {
        let events = self.fetch_events().await?;
        Ok(upcoming_events(
            &events,
            today,
            self.cfg.upcoming_horizon_days,
        ))
    }

    /// Every event day within `from..=to`, for marking a calendar.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `from` is after `to`, or the store error when
    /// the event list cannot be read.
    pub async fn event_calendar(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<BTreeSet<NaiveDate>, TarifaError> {
        if from > to {
            return Err(TarifaError::InvalidArg(format!(
                "calendar range ends ({to}) before it starts ({from})"
            )));
        }
        let events = self.fetch_events().await?;
        Ok(event_dates(&events, from, to))
    }
}
