//----------------------------------------
// Root lib
//----------------------------------------
//! Sample size, power, and simulated operating characteristics for clinical
//! trial designs: closed-form frequentist calculators for continuous,
//! binary, time-to-event, non-inferiority and multi-arm endpoints, a
//! Bayesian sample size search, and Monte-Carlo simulators for group
//! sequential and adaptive designs.
//!
//! Simulators take a caller-supplied `rand::Rng`, so seeded runs are
//! reproducible; see [`distribution::design_rng`].

/// Interim sample size re-estimation and conditional power
pub mod adaptive;
pub mod bayesian;
/// This module houses the public API
pub mod compute;
/// Defaults and simulator settings, loadable from TOML
pub mod config;
/// Special functions and random variates the calculators are built on
pub mod distribution;
/// This module contains error types
pub mod error;
pub mod group_sequential;
/// Historical estimates used to fill in missing design inputs
pub mod prior_feed;
/// Closed-form frequentist calculators
pub mod sample_size;
pub mod simulation;
/// Alpha spending functions and boundaries
pub mod spending;
pub mod util;

pub use compute::*;
pub use error::CtdesignErr;
