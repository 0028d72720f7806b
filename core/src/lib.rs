//! # Rendezvous Core
//!
//! Domain types for schedulable events whose date converges from a set of
//! candidates to one fixed date.
//!
//! ## Core Concepts
//!
//! - **`EventDate`**: a day or a half-open span
//! - **`EventDateSet`**: candidate dates, irreversibly fixable to exactly one
//! - **`Event`**: aggregate owning its date-set, with a status lifecycle and
//!   participants referenced by `UserId`
//! - **`Reservation`**: one user's claim on an event at its fixed date
//!
//! Everything here is synchronous and free of I/O. Aggregates are not
//! internally synchronised; give each one a single writer.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rendezvous_core::{Event, EventDate, EventId, EventStatus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut event = Event::create_draft(EventId::new(1));
//! event.set_title("Board game night");
//!
//! let friday = NaiveDate::from_ymd_opt(2025, 3, 7).ok_or("invalid date")?;
//! let saturday = friday.succ_opt().ok_or("invalid date")?;
//! event.date_mut().set_dates([EventDate::on(friday), EventDate::on(saturday)])?;
//! event.pre_publish()?;
//!
//! // Participants settled on Friday
//! event.date_mut().remove_date(&EventDate::on(saturday))?;
//! event.fix_date()?;
//! event.publish()?;
//!
//! assert_eq!(event.status(), EventStatus::Published);
//! assert_eq!(event.date().fixed_date(), Some(&EventDate::on(friday)));
//! # Ok(())
//! # }
//! ```

pub mod date;
pub mod error;
pub mod event;
pub mod location;
pub mod reservation;
pub mod user;

// Re-export main types for convenience
pub use date::{EventDate, EventDateSet};
pub use error::{DomainError, Result};
pub use event::{Event, EventId, EventStatus, MarkdownText, Participation};
pub use location::EventLocation;
pub use reservation::{Reservation, ReservationId};
pub use user::{User, UserId};
