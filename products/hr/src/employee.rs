use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    department::Department,
    editor::Evaluation,
    error::{HrError, HrResult},
    rating::{CriteriaRatings, Rating},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeRecord")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: Department,
    pub position: String,
    notes: String,
    criteria_ratings: CriteriaRatings,
    rating: f64,
    evaluated_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// An employee with no evaluation yet.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<Department>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
            position: position.into(),
            notes: String::new(),
            criteria_ratings: CriteriaRatings::new(),
            rating: 0.0,
            evaluated_at: None,
        }
    }

    /// Pre-populates ratings, rejecting criteria outside the department list.
    pub fn with_ratings<I, K>(mut self, ratings: I) -> HrResult<Self>
    where
        I: IntoIterator<Item = (K, Rating)>,
        K: Into<String>,
    {
        for (criterion, rating) in ratings {
            let criterion = criterion.into();
            self.ensure_criterion(&criterion)?;
            self.criteria_ratings.set(criterion, rating);
        }
        self.rating = self.criteria_ratings.average();
        Ok(self)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn criteria_ratings(&self) -> &CriteriaRatings {
        &self.criteria_ratings
    }

    /// Aggregate rating, 0 until evaluated.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn evaluated_at(&self) -> Option<DateTime<Utc>> {
        self.evaluated_at
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0.0
    }

    pub fn criteria(&self) -> &'static [&'static str] {
        self.department.criteria()
    }

    /// Label of the roster row action.
    pub fn action_label(&self) -> &'static str {
        if self.is_rated() { "Edit Rating" } else { "Add Rating" }
    }

    pub(crate) fn ensure_criterion(&self, criterion: &str) -> HrResult<()> {
        if self.department.has_criterion(criterion) {
            Ok(())
        } else {
            Err(HrError::UnknownCriterion {
                criterion: criterion.to_string(),
                department: self.department.to_string(),
            })
        }
    }

    /// Replaces the evaluation fields with a saved evaluation.
    pub(crate) fn record(&mut self, evaluation: Evaluation, at: DateTime<Utc>) {
        self.rating = evaluation.ratings.average();
        self.criteria_ratings = evaluation.ratings;
        self.notes = evaluation.notes;
        self.evaluated_at = Some(at);
    }
}

/// Stored form of an employee. The aggregate rating is derived on load.
#[derive(Deserialize)]
struct EmployeeRecord {
    id: String,
    name: String,
    department: Department,
    position: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    criteria_ratings: CriteriaRatings,
    #[serde(default)]
    evaluated_at: Option<DateTime<Utc>>,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = HrError;

    fn try_from(record: EmployeeRecord) -> Result<Self, Self::Error> {
        let mut employee = Employee::new(record.id, record.name, record.department, record.position)
            .with_ratings(record.criteria_ratings.iter())?
            .with_notes(record.notes);
        employee.evaluated_at = record.evaluated_at;
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> Rating {
        Rating::new(5).unwrap()
    }

    #[test]
    fn new_employee_is_unrated() {
        let employee = Employee::new("EMP001", "Juan Dela Cruz", "Field", "Field Worker");
        assert_eq!(employee.rating(), 0.0);
        assert!(!employee.is_rated());
        assert_eq!(employee.action_label(), "Add Rating");
        assert!(employee.evaluated_at().is_none());
    }

    #[test]
    fn preset_ratings_derive_the_aggregate() {
        let employee = Employee::new("EMP002", "Maria Santos", "Packing", "Packing Supervisor")
            .with_ratings([("Packaging Speed", five()), ("Quality Control", Rating::new(4).unwrap())])
            .unwrap();
        assert_eq!(employee.rating(), 4.5);
        assert_eq!(employee.action_label(), "Edit Rating");
    }

    #[test]
    fn preset_ratings_reject_foreign_criteria() {
        let err = Employee::new("EMP002", "Maria Santos", "Packing", "Packing Supervisor")
            .with_ratings([("Teamwork", five())])
            .unwrap_err();
        assert_eq!(
            err,
            HrError::UnknownCriterion {
                criterion: "Teamwork".into(),
                department: "Packing".into(),
            }
        );
    }

    #[test]
    fn unknown_department_has_no_criteria() {
        let employee = Employee::new("EMP099", "Temp", "Warehouse", "Picker");
        assert!(employee.criteria().is_empty());
        assert!(employee.ensure_criterion("Teamwork").is_err());
    }

    #[test]
    fn loading_derives_the_rating_from_criteria() {
        let raw = r#"{
            "id": "EMP002",
            "name": "Maria Santos",
            "department": "Packing",
            "position": "Packing Supervisor",
            "criteria_ratings": {"Packaging Speed": 2, "Quality Control": 3},
            "rating": 4.9
        }"#;
        let employee: Employee = serde_json::from_str(raw).unwrap();
        assert_eq!(employee.rating(), 2.5);
        assert_eq!(employee.criteria_ratings().len(), 2);
    }

    #[test]
    fn loading_rejects_foreign_criteria() {
        let raw = r#"{
            "id": "EMP002",
            "name": "Maria Santos",
            "department": "Packing",
            "position": "Packing Supervisor",
            "criteria_ratings": {"Teamwork": 1}
        }"#;
        let err = serde_json::from_str::<Employee>(raw).unwrap_err();
        assert!(err.to_string().contains("Teamwork"), "{err}");
    }
}
