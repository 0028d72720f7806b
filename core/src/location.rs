//! Where an event takes place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named place, optionally with a postal address and a map link.
///
/// Two locations are equal only when all three fields match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventLocation {
    /// Display name of the place (e.g. "Riverside Field")
    pub field_name: String,
    /// Postal address
    pub address: Option<String>,
    /// Link to the place on a map service
    pub map_url: Option<String>,
}

impl EventLocation {
    /// Create a location with only a name.
    #[must_use]
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            address: None,
            map_url: None,
        }
    }

    /// Set the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the map link.
    #[must_use]
    pub fn with_map_url(mut self, map_url: impl Into<String>) -> Self {
        self.map_url = Some(map_url.into());
        self
    }
}

impl fmt::Display for EventLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(address) => write!(f, "{} ({address})", self.field_name),
            None => f.write_str(&self.field_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_covers_all_fields() {
        let base = EventLocation::new("Riverside Field").with_address("1 River Rd");

        assert_eq!(base, base.clone());
        assert_ne!(base, EventLocation::new("Riverside Field"));
        assert_ne!(base, base.clone().with_map_url("https://maps.example.com/riverside"));
        assert_ne!(base, EventLocation::new("Hilltop").with_address("1 River Rd"));
    }

    #[test]
    fn test_display() {
        assert_eq!(EventLocation::new("Hilltop").to_string(), "Hilltop");
        assert_eq!(
            EventLocation::new("Hilltop").with_address("2 Hill St").to_string(),
            "Hilltop (2 Hill St)"
        );
    }
}
