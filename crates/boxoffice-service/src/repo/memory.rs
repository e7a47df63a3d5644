//! Multimap-backed hold repository with no persistence.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;
use boxoffice_entity::hold::{HoldId, SuccessfulHold};

use super::HoldRepository;

/// In-memory hold storage. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryHoldRepository {
    /// Live holds per customer email.
    holds: HashMap<String, Vec<SuccessfulHold>>,
}

impl InMemoryHoldRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HoldRepository for InMemoryHoldRepository {
    fn by_customer(&self, email: &str) -> Vec<SuccessfulHold> {
        let holds = self.holds.get(email).cloned().unwrap_or_default();
        debug!(customer = %email, count = holds.len(), "looked up holds");
        holds
    }

    fn all_expired(&self, now: DateTime<Utc>) -> Vec<(String, SuccessfulHold)> {
        let expired: Vec<_> = self
            .holds
            .iter()
            .flat_map(|(email, holds)| {
                holds
                    .iter()
                    .filter(move |hold| hold.is_expired_at(now))
                    .map(move |hold| (email.clone(), hold.clone()))
            })
            .collect();
        debug!(count = expired.len(), "found expired holds");
        expired
    }

    fn contains_id(&self, hold_id: HoldId) -> bool {
        self.holds
            .values()
            .flatten()
            .any(|hold| hold.hold_id == hold_id)
    }

    fn add(&mut self, email: &str, hold: SuccessfulHold) {
        debug!(customer = %email, hold_id = %hold.hold_id, "adding hold");
        self.holds.entry(email.to_string()).or_default().push(hold);
    }

    fn remove(&mut self, email: &str, hold_id: HoldId) -> AppResult<SuccessfulHold> {
        let holds = self
            .holds
            .get_mut(email)
            .ok_or_else(|| missing(email, hold_id))?;
        let index = holds
            .iter()
            .position(|hold| hold.hold_id == hold_id)
            .ok_or_else(|| missing(email, hold_id))?;
        let hold = holds.remove(index);
        if holds.is_empty() {
            self.holds.remove(email);
        }
        debug!(customer = %email, hold_id = %hold_id, "removed hold");
        Ok(hold)
    }
}

fn missing(email: &str, hold_id: HoldId) -> AppError {
    AppError::conflict(format!(
        "no stored hold with id {hold_id} for customer {email}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::error::ErrorKind;
    use chrono::Duration;

    const EMAIL_ONE: &str = "one@example.com";
    const EMAIL_TWO: &str = "two@example.com";

    fn hold(id: u64, expires_at: DateTime<Utc>) -> SuccessfulHold {
        SuccessfulHold::new(HoldId(id), vec![1, 2, 3], expires_at)
    }

    #[test]
    fn test_add_and_remove_by_identity() {
        let now = Utc::now();
        let tomorrow = now + Duration::days(1);
        let mut repo = InMemoryHoldRepository::new();
        repo.add(EMAIL_ONE, hold(1, tomorrow));
        repo.add(EMAIL_ONE, hold(2, tomorrow));
        repo.add(EMAIL_TWO, hold(3, tomorrow));

        repo.remove(EMAIL_ONE, HoldId(1)).expect("entry exists");

        let one = repo.by_customer(EMAIL_ONE);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].hold_id, HoldId(2));
        assert_eq!(repo.by_customer(EMAIL_TWO).len(), 1);
        assert!(repo.by_customer("nobody@example.com").is_empty());
    }

    #[test]
    fn test_all_expired_includes_the_boundary() {
        let now = Utc::now();
        let mut repo = InMemoryHoldRepository::new();
        repo.add(EMAIL_ONE, hold(1, now));
        repo.add(EMAIL_ONE, hold(2, now + Duration::days(1)));
        repo.add(EMAIL_TWO, hold(3, now + Duration::days(1)));

        let expired = repo.all_expired(now);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].0, EMAIL_ONE);
        assert_eq!(expired[0].1.hold_id, HoldId(1));

        // Pure read: nothing was removed.
        assert_eq!(repo.by_customer(EMAIL_ONE).len(), 2);
    }

    #[test]
    fn test_remove_of_absent_entry_is_a_conflict() {
        let mut repo = InMemoryHoldRepository::new();
        let err = repo
            .remove(EMAIL_ONE, HoldId(1))
            .expect_err("nothing stored");
        assert_eq!(err.kind, ErrorKind::Conflict);

        repo.add(EMAIL_ONE, hold(1, Utc::now()));
        let err = repo
            .remove(EMAIL_ONE, HoldId(2))
            .expect_err("wrong id for this customer");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_contains_id_spans_customers() {
        let tomorrow = Utc::now() + Duration::days(1);
        let mut repo = InMemoryHoldRepository::new();
        assert!(!repo.contains_id(HoldId(3)));

        repo.add(EMAIL_ONE, hold(1, tomorrow));
        repo.add(EMAIL_TWO, hold(3, tomorrow));
        assert!(repo.contains_id(HoldId(1)));
        assert!(repo.contains_id(HoldId(3)));

        repo.remove(EMAIL_TWO, HoldId(3)).expect("entry exists");
        assert!(!repo.contains_id(HoldId(3)));
    }
}
