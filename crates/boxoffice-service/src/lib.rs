//! # boxoffice-service
//!
//! Seat allocation, hold storage, and the reservation lifecycle for the
//! BoxOffice ticket service.
//!
//! ## Modules
//!
//! - `venue` — seat issuance and recovery (lowest number = best seat)
//! - `repo` — live hold storage keyed by customer email
//! - `service` — the ticket manager orchestrator and the background sweeper

pub mod repo;
pub mod service;
pub mod venue;

pub use repo::{HoldRepository, InMemoryHoldRepository};
pub use service::{HoldSweeper, TicketManager};
pub use venue::{LowestSeatVenue, Venue};
