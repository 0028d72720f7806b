//! Event dates and the date-fixing state machine.
//!
//! An event starts with any number of candidate [`EventDate`]s held in an
//! [`EventDateSet`]. Once exactly one candidate remains the set can be
//! fixed, after which it is frozen for good:
//!
//! ```text
//! Proposing (is_fixed = false) ──fix()──▶ Fixed (is_fixed = true)
//! ```
//!
//! The set is not internally synchronised. Callers mutating one set from
//! several tasks must serialise access themselves.

use crate::error::{DomainError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// EventDate
// ============================================================================

/// A calendar instant or a half-open span `[start, end)`.
///
/// An event date is all-day exactly when `start == end`; the flag is derived
/// from the two bounds so the two can never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "EventDateRepr")]
pub struct EventDate {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct EventDateRepr {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<EventDateRepr> for EventDate {
    type Error = DomainError;

    fn try_from(repr: EventDateRepr) -> Result<Self> {
        Self::new(repr.start, repr.end)
    }
}

impl EventDate {
    /// Create a date spanning `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSpan`] if `end` is before `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(DomainError::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create an all-day date for `date`, anchored at midnight.
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        Self {
            start: midnight,
            end: midnight,
        }
    }

    /// Start of the date.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// End of the date. Equal to [`start`](Self::start) for all-day dates.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether this date covers a whole day rather than a span.
    #[must_use]
    pub fn is_all_day(&self) -> bool {
        self.start == self.end
    }
}

impl From<NaiveDate> for EventDate {
    fn from(date: NaiveDate) -> Self {
        Self::on(date)
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all_day() {
            write!(f, "{} (all day)", self.start.date())
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

// ============================================================================
// EventDateSet
// ============================================================================

/// Candidate dates for an event, fixable to exactly one.
///
/// All mutation goes through the methods below. Once [`fix`](Self::fix) has
/// succeeded every mutator fails with [`DomainError::InvalidState`] and the
/// dates are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventDateSetRepr")]
pub struct EventDateSet {
    is_fixed: bool,
    dates: BTreeSet<EventDate>,
}

#[derive(Deserialize)]
struct EventDateSetRepr {
    #[serde(default)]
    is_fixed: bool,
    #[serde(default)]
    dates: Vec<EventDate>,
}

impl TryFrom<EventDateSetRepr> for EventDateSet {
    type Error = DomainError;

    fn try_from(repr: EventDateSetRepr) -> Result<Self> {
        let mut set = Self::with_dates(repr.dates);
        if repr.is_fixed {
            set.fix()?;
        }
        Ok(set)
    }
}

impl EventDateSet {
    /// Create an empty set in the proposing state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            is_fixed: false,
            dates: BTreeSet::new(),
        }
    }

    /// Create a proposing set seeded with `dates`. Duplicates collapse.
    #[must_use]
    pub fn with_dates(dates: impl IntoIterator<Item = EventDate>) -> Self {
        Self {
            is_fixed: false,
            dates: dates.into_iter().collect(),
        }
    }

    /// Whether the set has been fixed.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.is_fixed
    }

    /// Iterate over the dates in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = &EventDate> {
        self.dates.iter()
    }

    /// Number of dates in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the set holds no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Whether `date` is one of the dates.
    #[must_use]
    pub fn contains(&self, date: &EventDate) -> bool {
        self.dates.contains(date)
    }

    /// The confirmed date, once the set is fixed.
    #[must_use]
    pub fn fixed_date(&self) -> Option<&EventDate> {
        if self.is_fixed {
            self.dates.first()
        } else {
            None
        }
    }

    /// Replace all candidates with `date`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidState`] if the set is fixed.
    pub fn set_date(&mut self, date: EventDate) -> Result<()> {
        self.ensure_proposing("cannot set dates: the date is fixed")?;
        self.dates = BTreeSet::from([date]);
        Ok(())
    }

    /// Replace all candidates with `dates`. Duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidState`] if the set is fixed.
    pub fn set_dates(&mut self, dates: impl IntoIterator<Item = EventDate>) -> Result<()> {
        self.ensure_proposing("cannot set dates: the date is fixed")?;
        self.dates = dates.into_iter().collect();
        Ok(())
    }

    /// Add a candidate. Adding a date that is already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidState`] if the set is fixed.
    pub fn add_date(&mut self, date: EventDate) -> Result<()> {
        self.ensure_proposing("cannot add a date: the date is fixed")?;
        self.dates.insert(date);
        Ok(())
    }

    /// Remove a candidate. Removing an absent date is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidState`] if the set is fixed.
    pub fn remove_date(&mut self, date: &EventDate) -> Result<()> {
        self.ensure_proposing("cannot remove a date: the date is fixed")?;
        self.dates.remove(date);
        Ok(())
    }

    /// Freeze the set on its single remaining candidate.
    ///
    /// Calling `fix` on an already fixed set succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidState`] unless exactly one date is present.
    pub fn fix(&mut self) -> Result<()> {
        if self.is_fixed {
            return Ok(());
        }
        if self.dates.len() != 1 {
            return Err(DomainError::InvalidState(
                "cannot fix: not exactly one candidate date",
            ));
        }
        self.is_fixed = true;
        Ok(())
    }

    const fn ensure_proposing(&self, reason: &'static str) -> Result<()> {
        if self.is_fixed {
            Err(DomainError::InvalidState(reason))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    fn day(d: u32) -> EventDate {
        EventDate::on(NaiveDate::from_ymd_opt(2025, 6, d).unwrap())
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_date_only_is_all_day() {
        let date = day(14);
        assert!(date.is_all_day());
        assert_eq!(date.start(), date.end());
        assert_eq!(date.start(), at(14, 0));
    }

    #[test]
    fn test_span_is_not_all_day() {
        let date = EventDate::new(at(14, 18), at(14, 21)).unwrap();
        assert!(!date.is_all_day());
    }

    #[test]
    fn test_equal_bounds_span_is_all_day() {
        let date = EventDate::new(at(14, 9), at(14, 9)).unwrap();
        assert!(date.is_all_day());
    }

    #[test]
    fn test_reversed_span_is_rejected() {
        let err = EventDate::new(at(14, 21), at(14, 18)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSpan { .. }));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(day(14), EventDate::from(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()));
        assert_ne!(day(14), day(15));
    }

    #[test]
    fn test_new_set_is_proposing_and_empty() {
        let set = EventDateSet::new();
        assert!(!set.is_fixed());
        assert!(set.is_empty());
        assert_eq!(set.fixed_date(), None);
    }

    #[test]
    fn test_with_dates_deduplicates() {
        let set = EventDateSet::with_dates([day(1), day(2), day(1)]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_date_replaces_all() {
        let mut set = EventDateSet::with_dates([day(1), day(2)]);
        set.set_date(day(3)).unwrap();
        assert_eq!(set.dates().copied().collect::<Vec<_>>(), vec![day(3)]);
    }

    #[test]
    fn test_set_dates_replaces_and_deduplicates() {
        let mut set = EventDateSet::with_dates([day(1)]);
        set.set_dates([day(4), day(2), day(4)]).unwrap();
        assert_eq!(set.dates().copied().collect::<Vec<_>>(), vec![day(2), day(4)]);
    }

    #[test]
    fn test_add_date_is_idempotent() {
        let mut set = EventDateSet::new();
        set.add_date(day(1)).unwrap();
        set.add_date(day(1)).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_absent_date_is_noop() {
        let mut set = EventDateSet::with_dates([day(1)]);
        set.remove_date(&day(2)).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&day(1)));
    }

    #[test]
    fn test_fix_empty_set_fails() {
        let mut set = EventDateSet::new();
        let err = set.fix().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidState("cannot fix: not exactly one candidate date")
        );
        assert!(!set.is_fixed());
    }

    #[test]
    fn test_fix_with_several_candidates_fails() {
        let mut set = EventDateSet::with_dates([day(1), day(2)]);
        assert!(set.fix().is_err());
        assert!(!set.is_fixed());
    }

    #[test]
    fn test_fix_single_candidate() {
        let mut set = EventDateSet::with_dates([day(1), day(2)]);
        set.remove_date(&day(2)).unwrap();
        set.fix().unwrap();
        assert!(set.is_fixed());
        assert_eq!(set.fixed_date(), Some(&day(1)));
    }

    #[test]
    fn test_fix_is_idempotent() {
        let mut set = EventDateSet::with_dates([day(1)]);
        set.fix().unwrap();
        set.fix().unwrap();
        assert!(set.is_fixed());
    }

    #[test]
    fn test_fixed_set_rejects_mutation() {
        let mut set = EventDateSet::with_dates([day(1)]);
        set.fix().unwrap();

        assert!(set.set_date(day(2)).unwrap_err().is_invalid_state());
        assert!(set.set_dates([day(2), day(3)]).unwrap_err().is_invalid_state());
        assert!(set.add_date(day(2)).unwrap_err().is_invalid_state());
        assert!(set.remove_date(&day(1)).unwrap_err().is_invalid_state());

        assert_eq!(set.dates().copied().collect::<Vec<_>>(), vec![day(1)]);
    }
}
