//! Management forest backed by a generational arena.
//!
//! Every employee lives exactly once in the arena; roots and report lists
//! are handles into it.

use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::builder::StaffBuilder;
use crate::domain::{DomainError, Employee, EmployeeId, EmployeeRecord};

/// Spaces added per hierarchy level by [`Staff::render`].
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// The forest of management chains implied by a roster.
///
/// Immutable once built; all queries borrow.
#[derive(Debug)]
pub struct Staff {
    arena: Arena<Employee>,
    /// Every employee, sorted by name
    all: Vec<Index>,
    /// Employees without a manager, sorted by name
    roots: Vec<Index>,
}

impl Default for Staff {
    fn default() -> Self {
        StaffBuilder::new().build()
    }
}

impl Staff {
    pub(crate) fn from_parts(arena: Arena<Employee>, all: Vec<Index>, roots: Vec<Index>) -> Self {
        Self { arena, all, roots }
    }

    /// Build the forest from validated roster records.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EmployeeRecord>,
    {
        StaffBuilder::from_records(records).build()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn get(&self, idx: Index) -> Option<&Employee> {
        self.arena.get(idx)
    }

    /// All employees in name order, orphans included.
    pub fn employees(&self) -> impl Iterator<Item = (Index, &Employee)> + '_ {
        self.all
            .iter()
            .filter_map(move |&idx| self.arena.get(idx).map(|e| (idx, e)))
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn reports_of(&self, idx: Index) -> &[Index] {
        self.arena.get(idx).map(Employee::reports).unwrap_or(&[])
    }

    /// First employee (in name order) carrying `id`.
    pub fn find(&self, id: EmployeeId) -> Option<Index> {
        self.employees()
            .find(|(_, e)| e.id == id)
            .map(|(idx, _)| idx)
    }

    /// Sum of every salary on the roster, regardless of hierarchy position.
    #[instrument(level = "debug", skip(self))]
    pub fn total_salary(&self) -> u64 {
        self.employees().map(|(_, e)| e.salary).sum()
    }

    /// Indented listing of the forest, two spaces per level.
    pub fn render(&self) -> String {
        self.render_with(DEFAULT_TAB_WIDTH)
    }

    /// Indented listing of the forest, `tab_width` spaces per level.
    ///
    /// Pre-order: each name on its own line, followed by its reports.
    #[instrument(level = "debug", skip(self))]
    pub fn render_with(&self, tab_width: usize) -> String {
        let mut out = String::new();
        for (level, _, employee) in self.iter() {
            out.push_str(&" ".repeat(level * tab_width));
            out.push_str(&employee.name);
            out.push('\n');
        }
        out
    }

    /// Pre-order walk over all trees, yielding `(level, handle, employee)`.
    pub fn iter(&self) -> StaffIterator<'_> {
        StaffIterator::new(self)
    }

    /// Length of the longest management chain, 0 for an empty forest.
    pub fn depth(&self) -> usize {
        self.iter().map(|(level, _, _)| level + 1).max().unwrap_or(0)
    }

    /// Non-root employees that no root reaches.
    ///
    /// This covers a manager id naming nobody as well as a chain that loops
    /// back on itself without reaching a root.
    #[instrument(level = "debug", skip(self))]
    pub fn orphans(&self) -> Vec<Index> {
        let reachable: HashSet<Index> = self.iter().map(|(_, idx, _)| idx).collect();
        self.all
            .iter()
            .copied()
            .filter(|idx| !reachable.contains(idx))
            .collect()
    }

    pub fn is_orphan(&self, idx: Index) -> bool {
        self.get(idx).is_some_and(|e| !e.is_root()) && !self.iter().any(|(_, i, _)| i == idx)
    }

    /// Fail if any employee is unreachable.
    ///
    /// An orphan whose manager id names nobody is reported first, in name
    /// order; a cycle is reported only when every orphan's manager exists.
    pub fn check_orphans(&self) -> Result<(), DomainError> {
        let known: HashSet<EmployeeId> = self.employees().map(|(_, e)| e.id).collect();
        let orphans: Vec<&Employee> = self
            .orphans()
            .into_iter()
            .filter_map(|idx| self.get(idx))
            .collect();

        let dangling = orphans.iter().find_map(|e| match e.manager {
            Some(manager) if !known.contains(&manager) => Some((*e, manager)),
            _ => None,
        });
        if let Some((employee, manager)) = dangling {
            return Err(DomainError::DanglingManager {
                id: employee.id,
                name: employee.name.clone(),
                manager,
            });
        }

        match orphans.first() {
            Some(employee) => Err(DomainError::CycleDetected {
                id: employee.id,
                name: employee.name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Fail if two employees share an id.
    pub fn check_unique_ids(&self) -> Result<(), DomainError> {
        match self.employees().map(|(_, e)| e.id).duplicates().next() {
            Some(id) => Err(DomainError::DuplicateId(id)),
            None => Ok(()),
        }
    }

    /// One box-drawing tree per root.
    pub fn to_tree(&self) -> Vec<Tree<String>> {
        fn build_tree(staff: &Staff, idx: Index, parent: &mut Tree<String>) {
            for &report in staff.reports_of(idx) {
                if let Some(employee) = staff.get(report) {
                    let mut child = Tree::new(employee.name.clone());
                    build_tree(staff, report, &mut child);
                    parent.push(child);
                }
            }
        }

        self.roots
            .iter()
            .filter_map(|&root| {
                let employee = self.get(root)?;
                let mut tree = Tree::new(employee.name.clone());
                build_tree(self, root, &mut tree);
                Some(tree)
            })
            .collect()
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub struct StaffIterator<'a> {
    staff: &'a Staff,
    stack: Vec<(usize, Index)>,
}

impl<'a> StaffIterator<'a> {
    fn new(staff: &'a Staff) -> Self {
        // Reverse so the first root is popped first
        let stack = staff.roots.iter().rev().map(|&idx| (0, idx)).collect();
        Self { staff, stack }
    }
}

impl<'a> Iterator for StaffIterator<'a> {
    type Item = (usize, Index, &'a Employee);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((level, current)) = self.stack.pop() {
            if let Some(employee) = self.staff.get(current) {
                for &report in employee.reports().iter().rev() {
                    self.stack.push((level + 1, report));
                }
                return Some((level, current, employee));
            }
        }
        None
    }
}
