//! The in-memory employee roster.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    department::Department,
    editor::Evaluation,
    employee::Employee,
    error::{HrError, HrResult},
};

/// Employees in display order. Identifiers are unique.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Employee>", into = "Vec<Employee>")]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> HrResult<Self> {
        let mut seen = HashSet::new();
        let duplicate = employees
            .iter()
            .find(|employee| !seen.insert(employee.id.as_str()));
        if let Some(duplicate) = duplicate {
            return Err(HrError::DuplicateEmployee(duplicate.id.clone()));
        }
        Ok(Self { employees })
    }

    /// Mock roster the service starts with. Nobody is rated yet.
    pub fn seeded() -> Self {
        Self {
            employees: vec![
                Employee::new("EMP001", "Juan Dela Cruz", Department::Field, "Field Worker"),
                Employee::new("EMP002", "Maria Santos", Department::Packing, "Packing Supervisor"),
                Employee::new("EMP003", "Pedro Garcia", Department::Field, "Equipment Operator"),
                Employee::new("EMP004", "Ana Rodriguez", Department::Packing, "Quality Control"),
                Employee::new("EMP005", "Luis Fernandez", Department::Field, "Field Supervisor"),
                Employee::new("EMP006", "Carmen Torres", Department::Packing, "Packing Worker"),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn require(&self, id: &str) -> HrResult<&Employee> {
        self.get(id)
            .ok_or_else(|| HrError::UnknownEmployee(id.to_string()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.employees.iter()
    }

    pub fn as_slice(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Employees of a department, rated or not.
    pub fn headcount(&self, department: &Department) -> usize {
        self.employees
            .iter()
            .filter(|employee| &employee.department == department)
            .count()
    }

    pub fn filter<'a>(&'a self, filter: &'a RosterFilter) -> impl Iterator<Item = &'a Employee> + 'a {
        self.employees
            .iter()
            .filter(move |employee| filter.matches(employee))
    }

    /// Replaces the evaluation of one employee in place.
    pub(crate) fn apply(&mut self, evaluation: Evaluation, at: DateTime<Utc>) -> HrResult<&Employee> {
        let employee = self
            .employees
            .iter_mut()
            .find(|employee| employee.id == evaluation.employee_id)
            .ok_or_else(|| HrError::UnknownEmployee(evaluation.employee_id.clone()))?;
        employee.record(evaluation, at);
        Ok(employee)
    }
}

impl TryFrom<Vec<Employee>> for Roster {
    type Error = HrError;

    fn try_from(employees: Vec<Employee>) -> Result<Self, Self::Error> {
        Roster::new(employees)
    }
}

impl From<Roster> for Vec<Employee> {
    fn from(roster: Roster) -> Self {
        roster.employees
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Employee;
    type IntoIter = std::slice::Iter<'a, Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(Department),
}

impl DepartmentFilter {
    /// Parses a filter chip label; `All` (any case) or blank selects everyone.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(Department::from(trimmed))
        }
    }

    fn matches(&self, department: &Department) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == department,
        }
    }
}

/// Search box plus department chip of the roster list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub search: Option<String>,
    pub department: DepartmentFilter,
}

impl RosterFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        self.department.matches(&employee.department) && self.matches_search(employee)
    }

    fn matches_search(&self, employee: &Employee) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let term = term.to_lowercase();
        employee.name.to_lowercase().contains(&term) || employee.id.to_lowercase().contains(&term)
    }
}
