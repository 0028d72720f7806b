//! A user's claim on an event at its confirmed date.

use crate::date::EventDate;
use crate::error::{DomainError, Result};
use crate::event::{Event, EventId};
use crate::user::{User, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Reservation identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Create a `ReservationId` from its integer value
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the integer value
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Links one user to one event at one concrete date.
///
/// Holds the event and user by identifier; neither is owned. Two
/// reservations are the same reservation when their ids match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    event_id: EventId,
    user_id: UserId,
    date: EventDate,
}

impl Reservation {
    /// Create a reservation from its parts.
    ///
    /// No check is made that `date` is the event's fixed date; prefer
    /// [`for_event`](Self::for_event) when the event is at hand.
    #[must_use]
    pub const fn new(
        id: ReservationId,
        event_id: EventId,
        user_id: UserId,
        date: EventDate,
    ) -> Self {
        Self {
            id,
            event_id,
            user_id,
            date,
        }
    }

    /// Reserve `user` a place at `event` on its fixed date.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DateNotFixed`] if the event's date-set has not been fixed.
    pub fn for_event(id: ReservationId, event: &Event, user: &User) -> Result<Self> {
        let date = event
            .date()
            .fixed_date()
            .copied()
            .ok_or(DomainError::DateNotFixed)?;

        Ok(Self::new(id, event.id(), user.id().clone(), date))
    }

    /// Reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// The reserved event.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// The user holding the reservation.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The reserved date.
    #[must_use]
    pub const fn date(&self) -> EventDate {
        self.date
    }
}

impl PartialEq for Reservation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Reservation {}

impl Hash for Reservation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user() -> User {
        User::new(UserId::new("auth0|u1"), "ann", "ann@example.com")
    }

    fn day(d: u32) -> EventDate {
        EventDate::on(NaiveDate::from_ymd_opt(2025, 10, d).unwrap())
    }

    #[test]
    fn test_for_event_uses_fixed_date() {
        let mut event = Event::create_draft(EventId::new(3));
        event.date_mut().set_date(day(4)).unwrap();
        event.fix_date().unwrap();

        let reservation = Reservation::for_event(ReservationId::new(1), &event, &user()).unwrap();

        assert_eq!(reservation.event_id(), EventId::new(3));
        assert_eq!(reservation.user_id(), &UserId::new("auth0|u1"));
        assert_eq!(reservation.date(), day(4));
    }

    #[test]
    fn test_for_event_requires_fixed_date() {
        let mut event = Event::create_draft(EventId::new(3));
        event.date_mut().set_date(day(4)).unwrap();

        let err = Reservation::for_event(ReservationId::new(1), &event, &user()).unwrap_err();
        assert_eq!(err, DomainError::DateNotFixed);
    }

    #[test]
    fn test_equality_by_id() {
        let a = Reservation::new(ReservationId::new(1), EventId::new(1), UserId::new("a"), day(1));
        let b = Reservation::new(ReservationId::new(1), EventId::new(2), UserId::new("b"), day(2));
        let c = Reservation::new(ReservationId::new(2), EventId::new(1), UserId::new("a"), day(1));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
