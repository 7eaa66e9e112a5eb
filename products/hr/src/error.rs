use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HrError {
    #[error("employee {0} not found")]
    UnknownEmployee(String),
    #[error("employee {0} appears more than once in the roster")]
    DuplicateEmployee(String),
    #[error("criterion {criterion:?} is not evaluated in department {department}")]
    UnknownCriterion {
        criterion: String,
        department: String,
    },
    #[error("rating {0} outside 1..=5")]
    RatingOutOfRange(i64),
    #[error("no evaluation is open")]
    EditorClosed,
    #[error("evaluation for {employee_id} is missing {}", missing.join(", "))]
    IncompleteEvaluation {
        employee_id: String,
        missing: Vec<String>,
    },
}
