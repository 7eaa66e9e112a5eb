use chrono::Utc;
use tracing::info;

use crate::{
    aggregate::{Aggregates, compute_aggregates},
    department::Department,
    editor::{EvaluationDraft, EvaluationEditor},
    employee::Employee,
    error::{HrError, HrResult},
    rating::Rating,
    roster::{Roster, RosterFilter},
};

/// The roster together with its single evaluation editor.
#[derive(Clone, Debug)]
pub struct EvaluationDesk {
    roster: Roster,
    editor: EvaluationEditor,
    summary_departments: Vec<Department>,
}

impl Default for EvaluationDesk {
    fn default() -> Self {
        Self::new(Roster::seeded())
    }
}

impl EvaluationDesk {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            editor: EvaluationEditor::new(),
            summary_departments: vec![Department::Field, Department::Packing],
        }
    }

    /// Departments shown as average tiles.
    pub fn with_summary_departments(mut self, departments: Vec<Department>) -> Self {
        self.summary_departments = departments;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn editor(&self) -> &EvaluationEditor {
        &self.editor
    }

    pub fn summary_departments(&self) -> &[Department] {
        &self.summary_departments
    }

    pub fn filter<'a>(&'a self, filter: &'a RosterFilter) -> impl Iterator<Item = &'a Employee> + 'a {
        self.roster.filter(filter)
    }

    pub fn open(&mut self, employee_id: &str) -> HrResult<&EvaluationDraft> {
        let employee = self.roster.require(employee_id)?;
        Ok(self.editor.open(employee))
    }

    pub fn rate(&mut self, criterion: &str, rating: Rating) -> HrResult<&EvaluationDraft> {
        self.editor.rate(criterion, rating)
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> HrResult<&EvaluationDraft> {
        self.editor.set_notes(notes)
    }

    /// Saves the open evaluation and returns the updated employee. A rejected
    /// save leaves the draft open.
    pub fn save(&mut self) -> HrResult<&Employee> {
        let draft = self.editor.draft().ok_or(HrError::EditorClosed)?;
        self.roster.require(draft.employee_id())?;
        let evaluation = self.editor.save()?;
        let average = evaluation.average;
        let employee = self.roster.apply(evaluation, Utc::now())?;
        info!(employee = %employee.id, average, "evaluation saved");
        Ok(employee)
    }

    pub fn cancel(&mut self) {
        if let Some(discarded) = self.editor.cancel() {
            info!(employee = %discarded.employee_id(), "evaluation cancelled");
        }
    }

    pub fn aggregates(&self) -> Aggregates {
        compute_aggregates(&self.roster, &self.summary_departments)
    }
}
