//! Storage for live successful holds, keyed by customer email.

pub mod memory;

pub use memory::InMemoryHoldRepository;

use std::fmt;

use chrono::{DateTime, Utc};

use boxoffice_core::result::AppResult;
use boxoffice_entity::hold::{HoldId, SuccessfulHold};

/// Stores and retrieves the live holds the ticket manager has issued.
///
/// Like [`Venue`](crate::venue::Venue) implementations, repositories are
/// plain mutable state driven entirely from inside the manager's critical
/// section. Durable storage is a different implementation of this trait,
/// injected by the front end.
pub trait HoldRepository: Send + fmt::Debug {
    /// All live holds created for `email`, possibly empty.
    fn by_customer(&self, email: &str) -> Vec<SuccessfulHold>;

    /// Every (email, hold) pair whose expiry is at or before `now`.
    ///
    /// Pure read; removal is a separate step so the caller controls its
    /// ordering against seat release.
    fn all_expired(&self, now: DateTime<Utc>) -> Vec<(String, SuccessfulHold)>;

    /// Whether any live hold carries `hold_id`, for any customer.
    fn contains_id(&self, hold_id: HoldId) -> bool;

    /// Stores a hold under `email`. A customer may hold multiple entries.
    fn add(&mut self, email: &str, hold: SuccessfulHold);

    /// Removes and returns the hold with `hold_id` stored under `email`.
    ///
    /// The manager only removes entries it just looked up, so a missing
    /// entry is a conflict error, not a normal outcome.
    fn remove(&mut self, email: &str, hold_id: HoldId) -> AppResult<SuccessfulHold>;
}
