//! Ticket manager — hold issuance, confirmation, and expiry sweeping.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use boxoffice_core::config::AppConfig;
use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;
use boxoffice_entity::hold::{HoldId, SeatHold, SuccessfulHold};

use crate::repo::{HoldRepository, InMemoryHoldRepository};
use crate::venue::{LowestSeatVenue, Venue};

/// The shared mutable aggregate. The venue and the hold repository change
/// together or not at all, so one lock owns both.
#[derive(Debug)]
struct State {
    /// Seat allocator.
    venue: Box<dyn Venue>,
    /// Live hold storage.
    repo: Box<dyn HoldRepository>,
}

/// Manages the issuing and maintenance of reservations.
///
/// Expired holds are reclaimed lazily: every operation that reads or
/// changes capacity sweeps them first. Seat selection, storage, and hold
/// duration are injected at construction.
#[derive(Debug, Clone)]
pub struct TicketManager {
    /// How long a hold stays confirmable.
    hold_limit: Duration,
    /// Venue and repository, guarded as one unit.
    state: Arc<Mutex<State>>,
}

impl TicketManager {
    /// Creates a manager around an injected venue and hold repository.
    pub fn new(
        venue: Box<dyn Venue>,
        hold_limit: Duration,
        repo: Box<dyn HoldRepository>,
    ) -> Self {
        Self {
            hold_limit,
            state: Arc::new(Mutex::new(State { venue, repo })),
        }
    }

    /// Wires a manager from configuration: a lowest-seat venue with an
    /// in-memory repository.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let venue = LowestSeatVenue::new(config.venue.capacity)?;
        let hold_limit = Duration::seconds(config.hold.hold_duration_seconds as i64);
        Ok(Self::new(
            Box::new(venue),
            hold_limit,
            Box::new(InMemoryHoldRepository::new()),
        ))
    }

    /// The number of seats that are neither held nor reserved.
    pub async fn available_seats(&self) -> u32 {
        let mut state = self.state.lock().await;
        sweep_expired(&mut state, Utc::now());
        let seats = state.venue.remaining();
        debug!(seats, "returning available seats");
        seats
    }

    /// Finds and holds the best available seats for a customer.
    ///
    /// Never faults: invalid input and insufficient capacity come back as
    /// [`SeatHold::Failed`] so the caller keeps control flow.
    pub async fn find_and_hold_seats(&self, num_seats: i32, customer_email: &str) -> SeatHold {
        if num_seats <= 0 {
            warn!(num_seats, "rejecting hold request");
            return SeatHold::failed("numSeats must be > 0");
        }
        if customer_email.is_empty() {
            warn!("rejecting hold request with empty customerEmail");
            return SeatHold::failed("customerEmail is empty");
        }

        let mut state = self.state.lock().await;
        let now = Utc::now();
        sweep_expired(&mut state, now);

        let requested = num_seats as u32;
        let remaining = state.venue.remaining();
        if remaining < requested {
            warn!(requested, remaining, "not enough seats for hold request");
            return SeatHold::failed(format!("Only {remaining} seats available"));
        }

        let seats = match state.venue.issue(requested) {
            Ok(seats) => seats,
            Err(e) => {
                error!(error = %e, "venue refused issuance despite the capacity check");
                return SeatHold::failed(e.to_string());
            }
        };

        let hold_id = fresh_hold_id(state.repo.as_ref());
        let hold = SuccessfulHold::new(hold_id, seats, now + self.hold_limit);
        state.repo.add(customer_email, hold.clone());
        debug!(customer = %customer_email, %hold_id, num_seats, "hold created");
        SeatHold::Held(hold)
    }

    /// Commits seats held for a specific customer, returning a
    /// confirmation code.
    ///
    /// Faults with a validation error for an empty email, not-found when no
    /// live hold matches the (id, email) pair, and expired when the match
    /// lapsed before confirmation. An expired hold is left in place: the
    /// next sweep is the single path that reclaims its seats.
    pub async fn reserve_seats(&self, hold_id: HoldId, customer_email: &str) -> AppResult<String> {
        if customer_email.is_empty() {
            return Err(AppError::validation("customerEmail must not be empty"));
        }

        let mut state = self.state.lock().await;
        let selected = state
            .repo
            .by_customer(customer_email)
            .into_iter()
            .find(|hold| hold.hold_id == hold_id)
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Reservation for email: {customer_email}, id: {hold_id} does not exist"
                ))
            })?;
        debug!(customer = %customer_email, %hold_id, "found reservation");

        let now = Utc::now();
        if selected.is_expired_at(now) {
            error!(customer = %customer_email, %hold_id, "reservation is expired");
            return Err(AppError::expired(format!(
                "Reservation for email: {customer_email}, id: {hold_id} is expired"
            )));
        }

        let code = confirmation_code(customer_email, &selected.seats, now);
        state.repo.remove(customer_email, hold_id)?;
        debug!(customer = %customer_email, %hold_id, code = %code, "reservation confirmed");
        Ok(code)
    }

    /// Reclaims every expired hold, returning how many were swept.
    ///
    /// Runs implicitly before capacity-reading operations; the background
    /// sweeper calls it directly to bound reclaim latency.
    pub async fn sweep_expired_holds(&self) -> u32 {
        let mut state = self.state.lock().await;
        sweep_expired(&mut state, Utc::now())
    }
}

/// Removes expired holds from the repository and returns their seats to
/// the venue.
///
/// A per-entry fault means the venue and the repository disagree about an
/// issued seat; the entry is logged and skipped rather than aborting the
/// rest of the sweep.
fn sweep_expired(state: &mut State, now: DateTime<Utc>) -> u32 {
    let expired = state.repo.all_expired(now);
    if expired.is_empty() {
        return 0;
    }
    debug!(count = expired.len(), "sweeping expired holds");

    let mut swept = 0;
    for (email, hold) in expired {
        if let Err(e) = state.repo.remove(&email, hold.hold_id) {
            error!(
                customer = %email,
                hold_id = %hold.hold_id,
                error = %e,
                "failed to remove expired hold"
            );
            continue;
        }
        if let Err(e) = state.venue.release(&hold.seats) {
            error!(
                customer = %email,
                hold_id = %hold.hold_id,
                error = %e,
                "failed to release seats of expired hold"
            );
            continue;
        }
        swept += 1;
    }
    swept
}

/// Draws a hold id that no live hold carries.
///
/// Runs under the manager's lock, so the id is still unique when the hold
/// is inserted.
fn fresh_hold_id(repo: &dyn HoldRepository) -> HoldId {
    loop {
        let id = HoldId(rand::random());
        if !repo.contains_id(id) {
            return id;
        }
    }
}

/// Builds the confirmation code: `email:seat,seat,…:timestamp`.
fn confirmation_code(email: &str, seats: &[u32], now: DateTime<Utc>) -> String {
    let seats = seats
        .iter()
        .map(|seat| seat.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{email}:{seats}:{}", now.to_rfc3339())
}
