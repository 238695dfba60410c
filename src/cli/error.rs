//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_)
                    | ApplicationError::Schema { .. }
                    | ApplicationError::Parse { .. } => crate::exitcode::DATAERR,
                    ApplicationError::RosterNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Io { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, EmployeeId};
    use std::path::PathBuf;

    #[test]
    fn given_schema_violation_when_mapping_exit_code_then_dataerr() {
        let err = CliError::from(ApplicationError::Schema {
            message: "bad".into(),
        });

        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_missing_roster_when_mapping_exit_code_then_noinput() {
        let err = CliError::from(ApplicationError::RosterNotFound(PathBuf::from("x.yml")));

        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_domain_error_when_mapping_exit_code_then_dataerr() {
        let err = CliError::from(ApplicationError::from(DomainError::DuplicateId(EmployeeId(
            3,
        ))));

        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_invalid_args_when_mapping_exit_code_then_usage() {
        assert_eq!(
            CliError::InvalidArgs("nope".into()).exit_code(),
            crate::exitcode::USAGE
        );
    }

    #[test]
    fn given_malformed_roster_when_mapping_exit_code_then_dataerr() {
        let source = serde_yaml::from_str::<serde_json::Value>("- id: [unclosed\n").unwrap_err();
        let err = CliError::from(ApplicationError::Parse {
            context: "parse roster: employees.yml".into(),
            source,
        });

        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_unreadable_roster_when_mapping_exit_code_then_ioerr() {
        let err = CliError::from(ApplicationError::Io {
            context: "read roster: employees.yml".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });

        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
    }
}
