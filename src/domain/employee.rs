//! Employee node and raw roster record

use std::fmt;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

/// Identity of an employee within a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EmployeeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// One entry of a roster file, as it looks after schema validation.
///
/// The roster format calls the name field `first_name`; `name` is accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    #[serde(alias = "first_name")]
    pub name: String,
    pub salary: u64,
    /// Id of the manager, `None` for the top of a chain
    #[serde(default)]
    pub manager: Option<i64>,
}

impl EmployeeRecord {
    pub fn new(id: i64, name: impl Into<String>, salary: u64, manager: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            salary,
            manager,
        }
    }
}

/// Node of the management forest.
///
/// `reports` holds handles into the arena owned by [`crate::domain::Staff`],
/// never copies of the reporting employees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub salary: u64,
    pub manager: Option<EmployeeId>,
    reports: Vec<Index>,
}

impl Employee {
    pub fn new(
        id: impl Into<EmployeeId>,
        name: impl Into<String>,
        salary: u64,
        manager: Option<EmployeeId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            salary,
            manager,
            reports: Vec::new(),
        }
    }

    /// True for the top of a management chain (no manager).
    pub fn is_root(&self) -> bool {
        self.manager.is_none()
    }

    /// True when at least one employee reports to this one.
    pub fn is_manager(&self) -> bool {
        !self.reports.is_empty()
    }

    /// True when this employee's manager is `id`. Always false for a root.
    pub fn reports_to(&self, id: EmployeeId) -> bool {
        self.manager == Some(id)
    }

    /// Direct reports, sorted by name.
    pub fn reports(&self) -> &[Index] {
        &self.reports
    }

    /// Store the direct reports sorted ascending by name.
    ///
    /// Each handle comes paired with the name of the employee it points to.
    /// The sort is stable, so equal names keep the order they were given in.
    pub fn set_reports<S, I>(&mut self, reports: I)
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (Index, S)>,
    {
        let mut named: Vec<(Index, S)> = reports.into_iter().collect();
        named.sort_by(|a, b| a.1.as_ref().cmp(b.1.as_ref()));
        self.reports = named.into_iter().map(|(idx, _)| idx).collect();
    }

    pub(crate) fn clear_reports(&mut self) {
        self.reports.clear();
    }
}

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        Self::new(
            record.id,
            record.name,
            record.salary,
            record.manager.map(EmployeeId),
        )
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
