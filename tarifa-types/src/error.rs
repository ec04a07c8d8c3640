use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the Tarifa workspace.
///
/// This wraps capability mismatches, argument validation errors, store-tagged
/// failures, not-found conditions, timeouts, and malformed event input.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TarifaError {
    /// The requested capability is not implemented by the target store.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "update-observation-price").
        capability: String,
    },

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual store returned an error.
    #[error("{store} failed: {msg}")]
    Store {
        /// Store name that failed.
        store: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "observations for Grand Hotel".
        what: String,
    },

    /// An individual store call exceeded the configured timeout.
    #[error("store timed out: {capability} via {store}")]
    StoreTimeout {
        /// Store name that timed out.
        store: String,
        /// Capability label (e.g. "list-observations", "update-observation-price").
        capability: String,
    },

    /// The overall request exceeded its deadline or retry budget.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// The caller abandoned the operation before this record completed.
    #[error("cancelled before completion")]
    Cancelled,

    /// An event carries neither a single date nor a valid start/end range.
    #[error("invalid event {event}: {reason}")]
    InvalidEvent {
        /// Identifier of the offending event.
        event: String,
        /// What is wrong with its schedule.
        reason: String,
    },
}

impl TarifaError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Store` error with the store name and message.
    pub fn store(store: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `StoreTimeout` error.
    pub fn store_timeout(store: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::StoreTimeout {
            store: store.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Helper: build an `InvalidEvent` error.
    pub fn invalid_event(event: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            event: event.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Capability absence, benign not-found conditions, and caller-initiated
    /// cancellation are not actionable.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(
            self,
            Self::Unsupported { .. } | Self::NotFound { .. } | Self::Cancelled
        )
    }
}
