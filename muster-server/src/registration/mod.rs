//! Registration Engine
//!
//! The state machine tying registrations, event capacity counters and the
//! per-event FIFO waitlist together. This module is the sole writer of
//! `registered_count` and `waitlist`. There are no in-process locks; all
//! coordination happens through the store's conditional transactions.

mod engine;

#[cfg(test)]
mod tests;

pub use engine::RegistrationEngine;
