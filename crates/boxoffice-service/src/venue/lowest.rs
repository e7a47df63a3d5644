//! Venue implementation that prefers the lowest seat numbers.

use std::collections::BTreeSet;

use tracing::{debug, error};

use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;

use super::Venue;

/// Issues seats `1..=capacity`, lowest number first.
///
/// Released seats are reused before fresh ones. A released seat was issued
/// at or below the high-water mark, so draining the sorted returned set
/// before advancing the mark keeps every issued batch strictly ascending.
#[derive(Debug)]
pub struct LowestSeatVenue {
    /// Total seats this venue will ever issue.
    capacity: u32,
    /// High-water mark: the largest seat number ever issued.
    last_issued: u32,
    /// Seats returned after issuance, available for reuse.
    returned: BTreeSet<u32>,
}

impl LowestSeatVenue {
    /// Creates a venue that issues seats starting at 1, up to and
    /// including `capacity`.
    pub fn new(capacity: u32) -> AppResult<Self> {
        if capacity == 0 {
            return Err(AppError::validation("capacity must be > 0"));
        }
        Ok(Self {
            capacity,
            last_issued: 0,
            returned: BTreeSet::new(),
        })
    }
}

impl Venue for LowestSeatVenue {
    fn issue(&mut self, n: u32) -> AppResult<Vec<u32>> {
        if n == 0 {
            return Err(AppError::validation("n must be > 0"));
        }
        let count = n.min(self.remaining()) as usize;
        debug!(requested = n, granting = count, "issuing seats");

        let mut seats = Vec::with_capacity(count);
        while seats.len() < count {
            if let Some(seat) = self.returned.pop_first() {
                seats.push(seat);
            } else {
                self.last_issued += 1;
                seats.push(self.last_issued);
            }
        }
        debug!(?seats, "issued seats");
        Ok(seats)
    }

    fn release(&mut self, seats: &[u32]) -> AppResult<()> {
        // Verify the whole batch before re-admitting anything, so a bad
        // seat leaves the pool untouched.
        let mut batch = BTreeSet::new();
        for &seat in seats {
            let issued = (1..=self.last_issued).contains(&seat);
            if !issued || self.returned.contains(&seat) || !batch.insert(seat) {
                error!(seat, "seat was never issued or is already available");
                return Err(AppError::conflict(format!(
                    "seat {seat} was never issued or is already available"
                )));
            }
        }
        self.returned.append(&mut batch);
        debug!(available_returned = self.returned.len(), "seats released");
        Ok(())
    }

    fn remaining(&self) -> u32 {
        self.capacity - self.last_issued + self.returned.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::error::ErrorKind;

    const VENUE_SIZE: u32 = 10;

    fn venue() -> LowestSeatVenue {
        LowestSeatVenue::new(VENUE_SIZE).expect("capacity is positive")
    }

    #[test]
    fn test_issues_and_reissues_whole_venue() {
        let mut venue = venue();
        let seats = venue.issue(VENUE_SIZE).expect("valid request");
        assert_eq!(seats, (1..=VENUE_SIZE).collect::<Vec<_>>());
        assert_eq!(venue.remaining(), 0);

        venue.release(&seats).expect("all were issued");
        assert_eq!(venue.remaining(), VENUE_SIZE);

        let seats = venue.issue(VENUE_SIZE).expect("valid request");
        assert_eq!(seats, (1..=VENUE_SIZE).collect::<Vec<_>>());
        assert_eq!(venue.remaining(), 0);
    }

    #[test]
    fn test_released_seats_are_reused_first() {
        let mut venue = venue();
        let seats = venue.issue(3).expect("valid request");
        assert_eq!(seats, vec![1, 2, 3]);

        venue.release(&[2]).expect("seat 2 was issued");
        let more = venue.issue(3).expect("valid request");
        assert_eq!(more, vec![2, 4, 5]);
    }

    #[test]
    fn test_issues_fewer_when_supply_is_short() {
        let mut venue = venue();
        let seats = venue.issue(VENUE_SIZE * 2).expect("valid request");
        assert_eq!(seats.len(), VENUE_SIZE as usize);
        assert_eq!(venue.remaining(), 0);

        let none = venue.issue(1).expect("valid request");
        assert!(none.is_empty());
    }

    #[test]
    fn test_rejects_unissued_or_duplicate_releases() {
        let mut venue = venue();
        let err = venue.release(&[3]).expect_err("seat 3 was never issued");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "seat 3 was never issued or is already available");

        venue.issue(3).expect("valid request");
        venue.release(&[2]).expect("seat 2 was issued");
        let err = venue.release(&[2]).expect_err("seat 2 is already available");
        assert_eq!(err.kind, ErrorKind::Conflict);

        // Duplicates within one batch leave the pool untouched.
        let err = venue.release(&[1, 1]).expect_err("duplicate in batch");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(venue.remaining(), VENUE_SIZE - 3 + 1);
    }

    #[test]
    fn test_rejects_zero_arguments() {
        assert_eq!(
            LowestSeatVenue::new(0).expect_err("zero capacity").kind,
            ErrorKind::Validation
        );
        let mut venue = venue();
        assert_eq!(
            venue.issue(0).expect_err("zero seats").kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_remaining_counts_returned_and_fresh_seats() {
        let mut venue = venue();
        assert_eq!(venue.remaining(), VENUE_SIZE);
        venue.issue(4).expect("valid request");
        assert_eq!(venue.remaining(), VENUE_SIZE - 4);
        venue.release(&[1, 3]).expect("both were issued");
        assert_eq!(venue.remaining(), VENUE_SIZE - 2);
    }
}
