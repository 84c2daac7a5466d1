//! HRGate - role-based capability gating for the HR administration dashboard
//!
//! The crate resolves an actor's effective permission set by aggregating the
//! permissions of every role assigned to them, caches it for the session and
//! answers visibility decisions for protected dashboard content.

pub mod api;
pub mod config;
pub mod core;
pub mod utils;
