//! # Rendezvous Testing
//!
//! Testing utilities shared by the Rendezvous crates' integration tests.
//!
//! This crate provides:
//! - Fixtures for users, dates and events in known states
//! - proptest strategies for domain values
//! - A tracing subscriber suitable for tests
//!
//! ## Example
//!
//! ```
//! use rendezvous_testing::{fixtures, init_test_tracing};
//!
//! init_test_tracing();
//! let event = fixtures::fixed_event(1, fixtures::date(2025, 5, 17));
//! assert!(event.date().is_fixed());
//! ```

/// Fixtures for domain objects in well-known states.
pub mod fixtures {
    use chrono::{NaiveDate, NaiveDateTime};
    use rendezvous_core::{Event, EventDate, EventId, User, UserId};

    /// A user whose id, display name and email derive from `name`.
    #[must_use]
    pub fn user(name: &str) -> User {
        User::new(
            UserId::new(format!("auth0|{name}")),
            name,
            format!("{name}@example.com"),
        )
    }

    /// An all-day date.
    ///
    /// # Panics
    ///
    /// Panics if the arguments do not form a calendar date.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn date(year: i32, month: u32, day: u32) -> EventDate {
        let day = NaiveDate::from_ymd_opt(year, month, day).expect("fixture date should be valid");
        EventDate::on(day)
    }

    /// A timestamp on the given day.
    ///
    /// # Panics
    ///
    /// Panics if the arguments do not form a valid date and time.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("fixture datetime should be valid")
    }

    /// A fresh draft event.
    #[must_use]
    pub fn draft_event(id: i64) -> Event {
        Event::create_draft(EventId::new(id))
    }

    /// A draft event whose date-set is fixed on `date`.
    ///
    /// # Panics
    ///
    /// Never in practice: a fresh draft always accepts and fixes a single date.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn fixed_event(id: i64, date: EventDate) -> Event {
        let mut event = draft_event(id);
        event
            .date_mut()
            .set_date(date)
            .expect("fresh draft accepts a date");
        event.fix_date().expect("single candidate fixes");
        event
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use chrono::{Duration, NaiveDate, NaiveTime};
    use proptest::prelude::*;
    use rendezvous_core::EventDate;

    /// Calendar dates between 2000 and 2099.
    pub fn naive_date() -> impl Strategy<Value = NaiveDate> {
        (2000i32..2100, 1u32..=12, 1u32..=31)
            .prop_filter_map("not a calendar date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
    }

    /// All-day dates.
    pub fn all_day_date() -> impl Strategy<Value = EventDate> {
        naive_date().prop_map(EventDate::on)
    }

    /// Spans of up to three days starting at any second of a day.
    pub fn span_date() -> impl Strategy<Value = EventDate> {
        (naive_date(), 0u32..86_400, 0i64..259_200).prop_filter_map(
            "invalid span",
            |(day, secs, length)| {
                let start = day.and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)?);
                EventDate::new(start, start + Duration::seconds(length)).ok()
            },
        )
    }

    /// Any event date.
    pub fn event_date() -> impl Strategy<Value = EventDate> {
        prop_oneof![all_day_date(), span_date()]
    }

    /// Up to `max` event dates, possibly with duplicates.
    pub fn event_dates(max: usize) -> impl Strategy<Value = Vec<EventDate>> {
        proptest::collection::vec(event_date(), 0..=max)
    }
}

/// Install a tracing subscriber that writes through the test harness.
///
/// Honours `RUST_LOG`, defaulting to `debug`. Safe to call from every test;
/// only the first call installs anything.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
