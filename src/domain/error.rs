//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::EmployeeId;

/// Roster data that builds fine but breaks a stricter contract.
///
/// Construction never fails; these are raised only when a caller asks
/// for the check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("employee {name} (id {id}) reports to unknown manager id {manager}")]
    DanglingManager {
        id: EmployeeId,
        name: String,
        manager: EmployeeId,
    },

    #[error("employee {name} (id {id}) is caught in a management cycle")]
    CycleDetected { id: EmployeeId, name: String },

    #[error("duplicate employee id: {0}")]
    DuplicateId(EmployeeId),
}
