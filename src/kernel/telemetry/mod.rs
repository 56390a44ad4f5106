//! Session telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a write-only side layer. Nothing in the session reducer,
//! the access gate or the diagnosis engine may read it.
//!
//! # PRIVACY INVARIANT
//! Events must **NEVER** carry patient content (name, complaint, report text)
//! or submitted secrets. Only states, kinds, counts and durations.

pub mod event;
pub mod metrics;
pub mod recorder;
