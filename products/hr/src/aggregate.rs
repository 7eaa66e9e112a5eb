//! Roster-wide statistics, recomputed after every saved evaluation.

use serde::Serialize;

use crate::{
    department::Department,
    employee::Employee,
    rating::{filled_stars, format_score},
    roster::Roster,
};

pub const TOP_PERFORMER_LIMIT: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedEmployee {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub employee: Employee,
}

impl RankedEmployee {
    pub fn stars(&self) -> u8 {
        filled_stars(self.employee.rating())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepartmentAverage {
    pub department: Department,
    pub headcount: usize,
    pub rated: usize,
    /// `None` until somebody in the department is rated.
    pub mean: Option<f64>,
}

impl DepartmentAverage {
    pub fn label(&self) -> String {
        format_score(self.mean)
    }

    pub fn stars(&self) -> u8 {
        self.mean.map(filled_stars).unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Aggregates {
    pub top_performers: Vec<RankedEmployee>,
    pub department_averages: Vec<DepartmentAverage>,
}

/// Rated employees by descending rating, at most `limit`.
///
/// The sort is stable: equal ratings keep roster order.
pub fn top_performers(employees: &[Employee], limit: usize) -> Vec<RankedEmployee> {
    let mut rated: Vec<&Employee> = employees.iter().filter(|e| e.is_rated()).collect();
    rated.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    rated
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, employee)| RankedEmployee {
            rank: idx + 1,
            employee: employee.clone(),
        })
        .collect()
}

/// Mean rating of the rated employees of `department`.
pub fn department_mean(employees: &[Employee], department: &Department) -> Option<f64> {
    let (sum, count) = employees
        .iter()
        .filter(|e| &e.department == department && e.is_rated())
        .fold((0.0_f64, 0_usize), |(sum, count), e| (sum + e.rating(), count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn department_average(employees: &[Employee], department: &Department) -> DepartmentAverage {
    let members = employees.iter().filter(|e| &e.department == department);
    DepartmentAverage {
        department: department.clone(),
        headcount: members.clone().count(),
        rated: members.filter(|e| e.is_rated()).count(),
        mean: department_mean(employees, department),
    }
}

/// Summary widgets for the roster: top performers plus one average per
/// requested department.
pub fn compute_aggregates(roster: &Roster, departments: &[Department]) -> Aggregates {
    let employees = roster.as_slice();
    Aggregates {
        top_performers: top_performers(employees, TOP_PERFORMER_LIMIT),
        department_averages: departments
            .iter()
            .map(|department| department_average(employees, department))
            .collect(),
    }
}
