//! Error types for the event domain.

use crate::event::EventStatus;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Invariant violations raised by the event aggregate.
///
/// Every variant is a caller bug: the operation was attempted in a state
/// that does not allow it. None of them are worth retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Mutation of a frozen date-set, or fixing without exactly one candidate.
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    /// The requested status transition is not part of the lifecycle.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Status the event was in
        from: EventStatus,
        /// Status that was requested
        to: EventStatus,
    },

    /// A date span whose end precedes its start.
    #[error("Invalid date span: end {end} is before start {start}")]
    InvalidSpan {
        /// Span start
        start: NaiveDateTime,
        /// Span end
        end: NaiveDateTime,
    },

    /// A reservation was requested before the event's date was fixed.
    #[error("Event date is not fixed")]
    DateNotFixed,
}

impl DomainError {
    /// Returns `true` for errors raised because the aggregate was in the wrong state.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rendezvous_core::{DomainError, EventStatus};
    /// assert!(DomainError::InvalidState("frozen").is_invalid_state());
    /// assert!(DomainError::InvalidTransition {
    ///     from: EventStatus::Canceled,
    ///     to: EventStatus::Published,
    /// }
    /// .is_invalid_state());
    /// assert!(!DomainError::DateNotFixed.is_invalid_state());
    /// ```
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_) | Self::InvalidTransition { .. })
    }
}
