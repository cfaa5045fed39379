//! SQLite file bootstrap for `SqliteKvStore`.
//!
//! Connections handed out here already carry the latest `kv_entries`
//! schema; failures surface as `StoreError`.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
