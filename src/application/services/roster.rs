//! Roster service
//!
//! Reads a roster file, validates it against the schema and builds the
//! management forest.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::application::{
    ApplicationError, ApplicationResult, IoResultExt, ParseResultExt, SchemaValidator,
};
use crate::domain::{EmployeeRecord, Staff};
use crate::infrastructure::traits::FileSystem;

/// Service for loading rosters into a [`Staff`] forest.
pub struct RosterService {
    fs: Arc<dyn FileSystem>,
    validator: SchemaValidator,
    strict_orphans: bool,
}

impl RosterService {
    /// Create a new roster service.
    pub fn new(fs: Arc<dyn FileSystem>, validator: SchemaValidator) -> Self {
        Self {
            fs,
            validator,
            strict_orphans: false,
        }
    }

    /// Treat employees whose manager cannot be reached as a data error.
    pub fn with_strict_orphans(mut self, strict: bool) -> Self {
        self.strict_orphans = strict;
        self
    }

    /// Read a roster file into raw, unvalidated data.
    ///
    /// The file is YAML; JSON rosters parse as well.
    #[instrument(level = "debug", skip(self))]
    pub fn read_records(&self, path: &Path) -> ApplicationResult<Value> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::RosterNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read roster", path)?;
        // An empty document is an empty roster
        if content.trim().is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        serde_yaml::from_str(&content).with_parse_context("parse roster", path)
    }

    /// Validate raw data and turn it into records.
    ///
    /// Nothing is returned unless the whole roster passes the schema.
    pub fn parse_records(&self, data: Value) -> ApplicationResult<Vec<EmployeeRecord>> {
        self.validator.validate(&data)?;
        serde_json::from_value(data).map_err(|e| ApplicationError::Schema {
            message: e.to_string(),
        })
    }

    /// Build the forest from validated records, applying the orphan policy.
    pub fn build(&self, records: Vec<EmployeeRecord>) -> ApplicationResult<Staff> {
        let staff = Staff::from_records(records);

        let orphans = staff.orphans();
        if !orphans.is_empty() {
            info!("{} employees are not reachable from any root", orphans.len());
            if self.strict_orphans {
                staff.check_orphans()?;
            }
        }
        debug!(
            "build: {} employees, {} roots",
            staff.len(),
            staff.roots().len()
        );
        Ok(staff)
    }

    /// Read, validate and build a roster file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Staff> {
        let data = self.read_records(path)?;
        let records = self.parse_records(data)?;
        self.build(records)
    }

    /// Validate a roster file without building it. Returns the record count.
    #[instrument(level = "debug", skip(self))]
    pub fn validate_file(&self, path: &Path) -> ApplicationResult<usize> {
        let data = self.read_records(path)?;
        Ok(self.parse_records(data)?.len())
    }
}
