//! Junta election sweep simulator
//!
//! Runs the protocol over increasing population sizes, several independent
//! trials per size, and reports interaction counts:
//! - Population sizes doubling from a start size, optionally jittered
//! - Fresh run context and seed per trial
//! - Averages as interactions, interactions / n and interactions / (n log2 n)
//! - Histogram of sampled initial values per trial

pub mod config;
pub mod event_sink;
pub mod runner;
pub mod stats;

pub use config::SweepConfig;
pub use runner::SweepRunner;
