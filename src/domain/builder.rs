//! Staff builder: turns a flat roster into a management forest.

use std::collections::{HashMap, HashSet};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, warn};

use crate::domain::staff::Staff;
use crate::domain::{Employee, EmployeeId, EmployeeRecord};

/// Collects employees and links each one under its manager.
///
/// Reports are grouped by manager id in a single pass, then attached by a
/// depth-first walk from the roots, so no level rescans the roster.
pub struct StaffBuilder {
    arena: Arena<Employee>,
    /// Handles in insertion order, the tie-break for equal names
    order: Vec<Index>,
}

impl Default for StaffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StaffBuilder {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            order: Vec::new(),
        }
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EmployeeRecord>,
    {
        let mut builder = Self::new();
        for record in records {
            builder.add(Employee::from(record));
        }
        builder
    }

    /// Add an employee. Reports it already carries are dropped.
    pub fn add(&mut self, mut employee: Employee) -> Index {
        employee.clear_reports();
        let idx = self.arena.insert(employee);
        self.order.push(idx);
        idx
    }

    #[instrument(level = "debug", skip(self), fields(employees = self.order.len()))]
    pub fn build(mut self) -> Staff {
        let mut all = std::mem::take(&mut self.order);
        {
            let arena = &self.arena;
            all.sort_by(|a, b| arena[*a].name.cmp(&arena[*b].name));
        }

        let roots: Vec<Index> = all
            .iter()
            .copied()
            .filter(|&idx| self.arena[idx].is_root())
            .collect();
        debug!("build: {} roots", roots.len());

        let groups = self.group_by_manager(&all);
        self.attach_reports(&roots, &groups);

        Staff::from_parts(self.arena, all, roots)
    }

    /// Map each manager id to its direct reports, in name order.
    fn group_by_manager(&self, sorted: &[Index]) -> HashMap<EmployeeId, Vec<Index>> {
        let mut groups: HashMap<EmployeeId, Vec<Index>> = HashMap::new();
        for &idx in sorted {
            if let Some(manager) = self.arena[idx].manager {
                groups.entry(manager).or_default().push(idx);
            }
        }
        groups
    }

    /// Walk down from the roots, handing each manager its group.
    ///
    /// A node is attached at most once. With duplicate ids a group can be
    /// claimed by several managers; the first one reached keeps it.
    fn attach_reports(&mut self, roots: &[Index], groups: &HashMap<EmployeeId, Vec<Index>>) {
        let mut attached: HashSet<Index> = roots.iter().copied().collect();
        let mut stack: Vec<Index> = roots.iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            let manager_id = self.arena[current].id;
            let Some(group) = groups.get(&manager_id) else {
                continue;
            };

            let mut claimed = Vec::with_capacity(group.len());
            for &report in group {
                if attached.insert(report) {
                    claimed.push((report, self.arena[report].name.clone()));
                } else {
                    warn!(
                        "employee {} already placed, not attaching it under {} again",
                        self.arena[report].id, manager_id
                    );
                }
            }
            if claimed.is_empty() {
                continue;
            }

            let manager = &mut self.arena[current];
            manager.set_reports(claimed);
            stack.extend(manager.reports().iter().rev().copied());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_employee_with_stale_reports_when_building_then_reports_are_recomputed() {
        let mut builder = StaffBuilder::new();
        let root = builder.add(Employee::new(1, "boss", 1, None));
        let mut worker = Employee::new(2, "worker", 1, Some(EmployeeId(1)));
        worker.set_reports([(root, "boss")]);
        let worker = builder.add(worker);

        let staff = builder.build();

        assert_eq!(staff.reports_of(root), &[worker]);
        assert!(staff.reports_of(worker).is_empty());
    }

    #[test]
    fn given_self_managed_duplicate_id_when_building_then_terminates() {
        let staff = StaffBuilder::from_records(vec![
            EmployeeRecord::new(1, "boss", 1, None),
            EmployeeRecord::new(1, "echo", 1, Some(1)),
        ])
        .build();

        let boss = staff.roots()[0];
        assert_eq!(staff.reports_of(boss).len(), 1);
        assert_eq!(staff.iter().count(), 2);
    }

    #[test]
    fn given_two_managers_sharing_id_when_building_then_reports_attach_once() {
        let staff = StaffBuilder::from_records(vec![
            EmployeeRecord::new(1, "alpha", 1, None),
            EmployeeRecord::new(1, "beta", 1, None),
            EmployeeRecord::new(2, "gamma", 1, Some(1)),
        ])
        .build();

        let placements: usize = staff
            .employees()
            .map(|(idx, _)| staff.reports_of(idx).len())
            .sum();
        assert_eq!(placements, 1);
        assert_eq!(staff.render(), "alpha\n  gamma\nbeta\n");
    }
}
