//! The event aggregate.
//!
//! An [`Event`] owns its [`EventDateSet`] and refers to its participants by
//! [`UserId`]. Status follows a small forward-only lifecycle:
//!
//! ```text
//! Draft ──pre_publish()──▶ PrePublished ──publish()──▶ Published
//!   │                          │                           │
//!   └──────────cancel()────────┴──────────cancel()─────────┴──▶ Canceled
//! ```
//!
//! Publishing requires the date to be fixed. `Canceled` is terminal.

use crate::date::EventDateSet;
use crate::error::{DomainError, Result};
use crate::location::EventLocation;
use crate::user::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Value types
// ============================================================================

/// Opaque event identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Create an `EventId` from its integer value
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

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Markdown-formatted rich text. Never null; empty by default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkdownText(String);

impl MarkdownText {
    /// Wrap a markdown string.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw markdown source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for MarkdownText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for MarkdownText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for MarkdownText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle stage of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    /// Being authored; not visible to participants
    Draft,
    /// Shown to participants while the date is being settled
    PrePublished,
    /// Live, with a fixed date
    Published,
    /// Called off (terminal)
    Canceled,
}

impl EventStatus {
    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// This checks the transition table only. [`Event::publish`] additionally
    /// requires the date to be fixed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::PrePublished)
                | (Self::PrePublished, Self::Published)
                | (Self::Draft | Self::PrePublished | Self::Published, Self::Canceled)
        )
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::PrePublished => write!(f, "PrePublished"),
            Self::Published => write!(f, "Published"),
            Self::Canceled => write!(f, "Canceled"),
        }
    }
}

/// How a user takes part in an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participation {
    /// Asked to join, not yet confirmed
    Invited,
    /// Confirmed attendance
    Confirmed,
}

// ============================================================================
// Event
// ============================================================================

/// A schedulable activity.
///
/// Not internally synchronised: a single writer must own each event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRepr")]
pub struct Event {
    id: EventId,
    title: String,
    description: MarkdownText,
    status: EventStatus,
    date: EventDateSet,
    location: Option<EventLocation>,
    participants: BTreeMap<UserId, Participation>,
}

#[derive(Deserialize)]
struct EventRepr {
    id: EventId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: MarkdownText,
    status: EventStatus,
    #[serde(default)]
    date: EventDateSet,
    #[serde(default)]
    location: Option<EventLocation>,
    #[serde(default)]
    participants: BTreeMap<UserId, Participation>,
}

impl TryFrom<EventRepr> for Event {
    type Error = DomainError;

    fn try_from(repr: EventRepr) -> Result<Self> {
        if repr.status == EventStatus::Published && !repr.date.is_fixed() {
            return Err(DomainError::DateNotFixed);
        }
        Ok(Self {
            id: repr.id,
            title: repr.title,
            description: repr.description,
            status: repr.status,
            date: repr.date,
            location: repr.location,
            participants: repr.participants,
        })
    }
}

impl Event {
    /// Create a draft with no participants.
    ///
    /// Title and description are empty, the date-set is empty and proposing,
    /// and no location is set.
    #[must_use]
    pub fn create_draft(id: EventId) -> Self {
        Self::create_draft_with_participants(id, std::iter::empty())
    }

    /// Create a draft, inviting the given users.
    ///
    /// Users passed here are registered as [`Participation::Invited`];
    /// use [`confirm`](Self::confirm) once they accept.
    #[must_use]
    pub fn create_draft_with_participants(
        id: EventId,
        participants: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            id,
            title: String::new(),
            description: MarkdownText::default(),
            status: EventStatus::Draft,
            date: EventDateSet::new(),
            location: None,
            participants: participants
                .into_iter()
                .map(|user_id| (user_id, Participation::Invited))
                .collect(),
        }
    }

    /// Event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Event title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Event description.
    #[must_use]
    pub const fn description(&self) -> &MarkdownText {
        &self.description
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<MarkdownText>) {
        self.description = description.into();
    }

    /// Current lifecycle stage.
    #[must_use]
    pub const fn status(&self) -> EventStatus {
        self.status
    }

    /// The event's candidate or fixed dates.
    #[must_use]
    pub const fn date(&self) -> &EventDateSet {
        &self.date
    }

    /// Mutable access to the date-set. Its own rules still apply, so a
    /// fixed set stays frozen.
    pub fn date_mut(&mut self) -> &mut EventDateSet {
        &mut self.date
    }

    /// Fix the date-set on its single candidate.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidState`] unless exactly one candidate is present.
    pub fn fix_date(&mut self) -> Result<()> {
        self.date.fix()
    }

    /// Where the event takes place, if known.
    #[must_use]
    pub const fn location(&self) -> Option<&EventLocation> {
        self.location.as_ref()
    }

    /// Set or clear the location.
    pub fn set_location(&mut self, location: Option<EventLocation>) {
        self.location = location;
    }

    // ------------------------------------------------------------------------
    // Participants
    // ------------------------------------------------------------------------

    /// All participants with their participation.
    pub fn participants(&self) -> impl Iterator<Item = (&UserId, Participation)> {
        self.participants.iter().map(|(id, p)| (id, *p))
    }

    /// Participants who confirmed.
    pub fn confirmed_participants(&self) -> impl Iterator<Item = &UserId> {
        self.participants
            .iter()
            .filter(|(_, p)| **p == Participation::Confirmed)
            .map(|(id, _)| id)
    }

    /// How `user_id` takes part, if at all.
    #[must_use]
    pub fn participation(&self, user_id: &UserId) -> Option<Participation> {
        self.participants.get(user_id).copied()
    }

    /// Invite a user. Existing participants keep their current participation.
    pub fn invite(&mut self, user_id: UserId) {
        self.participants
            .entry(user_id)
            .or_insert(Participation::Invited);
    }

    /// Mark a user as confirmed, adding them if they were not invited.
    pub fn confirm(&mut self, user_id: UserId) {
        self.participants.insert(user_id, Participation::Confirmed);
    }

    /// Remove a participant. Returns whether they were present.
    pub fn remove_participant(&mut self, user_id: &UserId) -> bool {
        self.participants.remove(user_id).is_some()
    }

    // ------------------------------------------------------------------------
    // Status transitions
    // ------------------------------------------------------------------------

    /// Move `Draft → PrePublished`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] from any other status.
    pub fn pre_publish(&mut self) -> Result<()> {
        self.transition_to(EventStatus::PrePublished)
    }

    /// Move `PrePublished → Published`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] from any other status, or
    /// [`DomainError::InvalidState`] if the date is not fixed.
    pub fn publish(&mut self) -> Result<()> {
        self.ensure_transition(EventStatus::Published)?;
        if !self.date.is_fixed() {
            return Err(DomainError::InvalidState(
                "cannot publish: the date is not fixed",
            ));
        }
        self.status = EventStatus::Published;
        Ok(())
    }

    /// Cancel the event from any non-terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] if already canceled.
    pub fn cancel(&mut self) -> Result<()> {
        self.transition_to(EventStatus::Canceled)
    }

    fn transition_to(&mut self, next: EventStatus) -> Result<()> {
        self.ensure_transition(next)?;
        self.status = next;
        Ok(())
    }

    const fn ensure_transition(&self, next: EventStatus) -> Result<()> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.status,
                to: next,
            })
        }
    }
}
