//! Core use-case services.
//!
//! # Responsibility
//! - Turn shell intents into ordered repository/history/store steps.
//! - Keep the FFI layer decoupled from storage and history details.

pub mod scoreboard_service;
