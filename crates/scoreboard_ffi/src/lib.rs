//! FFI surface consumed by the Flutter shell.

pub mod api;
mod session;
