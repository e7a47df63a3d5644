//! Reservation lifecycle orchestration.

pub mod manager;
pub mod sweeper;

pub use manager::TicketManager;
pub use sweeper::HoldSweeper;
