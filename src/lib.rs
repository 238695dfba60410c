//! orgtree: rebuild a management hierarchy from a flat employee roster.
//!
//! Layers, innermost first:
//! - [`domain`]: employees and the management forest, no I/O
//! - [`application`]: schema validation and the roster service
//! - [`infrastructure`]: I/O traits and service wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{Employee, EmployeeId, EmployeeRecord, Staff, StaffBuilder};
