//! Repository layer for board/person state.
//!
//! # Responsibility
//! - Own boards and their people in memory.
//! - Return semantic errors (`Validation`, `InvariantViolation`, not-found).
//!
//! # Invariants
//! - Every write validates input before touching state.

pub mod board_repo;
