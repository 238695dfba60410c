//! Domain layer: roster entities and the management forest
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod employee;
pub mod error;
pub mod staff;

pub use builder::StaffBuilder;
pub use employee::{Employee, EmployeeId, EmployeeRecord};
pub use error::DomainError;
pub use staff::{Staff, StaffIterator, DEFAULT_TAB_WIDTH};
