//! HR vertical slice: employee evaluations.
//!
//! A manager opens an [`EvaluationEditor`] for one employee of the
//! [`Roster`], scores every criterion of the employee's department and saves.
//! Aggregates (top performers, department means) are recomputed from the
//! roster after each save via [`compute_aggregates`].

pub mod aggregate;
pub mod department;
pub mod desk;
pub mod editor;
mod employee;
mod error;
pub mod rating;
pub mod roster;

pub use aggregate::{
    Aggregates, DepartmentAverage, RankedEmployee, TOP_PERFORMER_LIMIT, compute_aggregates,
    department_mean, top_performers,
};
pub use department::{Department, criteria_for};
pub use desk::EvaluationDesk;
pub use editor::{Evaluation, EvaluationDraft, EvaluationEditor};
pub use employee::Employee;
pub use error::{HrError, HrResult};
pub use rating::{CriteriaRatings, Rating};
pub use roster::{DepartmentFilter, Roster, RosterFilter};
