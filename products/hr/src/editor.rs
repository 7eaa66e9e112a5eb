//! Evaluation editor state machine.
//!
//! ```text
//! Closed --open(employee)--> Editing(draft)
//! Editing --open(other)----> Editing(fresh draft for other)
//! Editing --save-----------> Closed   (when every criterion is rated)
//! Editing --cancel---------> Closed
//! ```

use serde::Serialize;
use tracing::debug;

use crate::{
    department::Department,
    employee::Employee,
    error::{HrError, HrResult},
    rating::{self, CriteriaRatings, Rating},
};

/// A completed evaluation ready to be applied to the roster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    pub employee_id: String,
    pub ratings: CriteriaRatings,
    pub notes: String,
    pub average: f64,
}

/// Editing buffer for one employee.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationDraft {
    employee_id: String,
    department: Department,
    ratings: CriteriaRatings,
    notes: String,
}

impl EvaluationDraft {
    /// Buffer seeded from the employee's current record.
    pub fn seeded_from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id.clone(),
            department: employee.department.clone(),
            ratings: employee.criteria_ratings().clone(),
            notes: employee.notes().to_string(),
        }
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn department(&self) -> &Department {
        &self.department
    }

    pub fn criteria(&self) -> &'static [&'static str] {
        self.department.criteria()
    }

    pub fn ratings(&self) -> &CriteriaRatings {
        &self.ratings
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Criteria in department order with their current rating, if any.
    pub fn scores(&self) -> impl Iterator<Item = (&'static str, Option<Rating>)> + '_ {
        self.criteria()
            .iter()
            .map(|criterion| (*criterion, self.ratings.get(criterion)))
    }

    pub fn average(&self) -> f64 {
        self.ratings.average()
    }

    pub fn is_complete(&self) -> bool {
        rating::is_complete(self.criteria(), &self.ratings)
    }

    pub fn missing(&self) -> Vec<String> {
        rating::missing_criteria(self.criteria(), &self.ratings)
    }

    pub fn rate(&mut self, criterion: &str, rating: Rating) -> HrResult<()> {
        if !self.department.has_criterion(criterion) {
            return Err(HrError::UnknownCriterion {
                criterion: criterion.to_string(),
                department: self.department.to_string(),
            });
        }
        self.ratings.set(criterion, rating);
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    fn finish(self) -> Evaluation {
        let average = self.average();
        Evaluation {
            employee_id: self.employee_id,
            ratings: self.ratings,
            notes: self.notes,
            average,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EvaluationEditor {
    draft: Option<EvaluationDraft>,
}

impl EvaluationEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&EvaluationDraft> {
        self.draft.as_ref()
    }

    fn draft_mut(&mut self) -> HrResult<&mut EvaluationDraft> {
        self.draft.as_mut().ok_or(HrError::EditorClosed)
    }

    /// Opens the editor for `employee`, discarding any buffer for a
    /// previous target.
    pub fn open(&mut self, employee: &Employee) -> &EvaluationDraft {
        if let Some(previous) = self.draft.as_ref().filter(|d| d.employee_id != employee.id) {
            debug!(previous = %previous.employee_id, next = %employee.id, "switching evaluation target");
        }
        self.draft.insert(EvaluationDraft::seeded_from(employee))
    }

    pub fn rate(&mut self, criterion: &str, rating: Rating) -> HrResult<&EvaluationDraft> {
        let draft = self.draft_mut()?;
        draft.rate(criterion, rating)?;
        Ok(draft)
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> HrResult<&EvaluationDraft> {
        let draft = self.draft_mut()?;
        draft.set_notes(notes);
        Ok(draft)
    }

    /// Closes the editor and yields the evaluation. Incomplete drafts are
    /// rejected and stay open.
    pub fn save(&mut self) -> HrResult<Evaluation> {
        let draft = self.draft.as_ref().ok_or(HrError::EditorClosed)?;
        if !draft.is_complete() {
            return Err(HrError::IncompleteEvaluation {
                employee_id: draft.employee_id.clone(),
                missing: draft.missing(),
            });
        }
        let draft = self.draft.take().ok_or(HrError::EditorClosed)?;
        Ok(draft.finish())
    }

    /// Closes the editor without producing an evaluation.
    pub fn cancel(&mut self) -> Option<EvaluationDraft> {
        self.draft.take()
    }
}
