//! Venue configuration.

use serde::{Deserialize, Serialize};

/// Venue capacity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Total number of seats the venue will ever issue, numbered
    /// `1..=capacity`. Must be greater than zero.
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> u32 {
    100
}
