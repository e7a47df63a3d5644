//! # boxoffice-entity
//!
//! Domain value objects for BoxOffice: hold identifiers, successful holds,
//! and the hold-request outcome union.

pub mod hold;

pub use hold::{HoldId, SeatHold, SuccessfulHold};
