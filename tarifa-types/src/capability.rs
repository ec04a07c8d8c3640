use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Raw price observations for a property.
    ListObservations,
    /// Local events, optionally filtered by location.
    ListEvents,
    /// Overwrite the price of a single observation.
    UpdateObservationPrice,

    /// Canonical daily series for a property.
    DailySeries,
    /// Recommendations for one property and date.
    Recommendations,
    /// Write-back of accepted recommendations.
    AcceptRecommendations,
    /// Polling for fresh observations after a scrape.
    Refresh,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListObservations => "list-observations",
            Self::ListEvents => "list-events",
            Self::UpdateObservationPrice => "update-observation-price",
            Self::DailySeries => "daily-series",
            Self::Recommendations => "recommendations",
            Self::AcceptRecommendations => "accept-recommendations",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
