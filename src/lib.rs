//! Back-office console dashboard service.
//!
//! Each mounted dashboard view gets its own snapshot store, a pair of
//! polling timers (loading and live update) and a guarded refresh command.
//! Views are rendered to JSON and streamed over HTTP.
//!
//! - [`domain`]: snapshot sections and their invariants
//! - [`application`]: store, polling, refresh and session lifecycle
//! - [`infrastructure`]: configuration, encoders and the simulated source
//! - [`presentation`]: render model and HTTP handlers

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
