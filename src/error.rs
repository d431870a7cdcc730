use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Raised before any validation runs when the document has the wrong shape.
#[derive(Debug, Error)]
pub enum ScheduleInputError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Which end of a task's date range a date problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    pub fn key(self) -> &'static str {
        match self {
            DateField::Start => "startDate",
            DateField::End => "endDate",
        }
    }
}

/// One accumulated schedule problem.
///
/// Every variant but `UnresolvedDependency`, `Cycle` and `TemporalOrdering`
/// belongs to the per-task structural family.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("task {task}: missing required field '{field}'")]
    MissingField { task: String, field: &'static str },

    #[error("task {task}: field '{field}' has an unusable value {value}")]
    InvalidField {
        task: String,
        field: &'static str,
        value: String,
    },

    #[error("task {task}: invalid {} format '{raw}'", .field.key())]
    InvalidDate {
        task: String,
        field: DateField,
        raw: String,
    },

    #[error("task {task}: start date {start} is after end date {end}")]
    StartAfterEnd {
        task: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("task {task}: progress must be between 0 and 100 (got {progress})")]
    ProgressOutOfRange { task: String, progress: f64 },

    #[error("task {task}: dependency #{position} is not a task id or {{\"taskId\": ...}} edge: {value}")]
    InvalidDependency {
        task: String,
        position: usize,
        value: String,
    },

    #[error("task {task}: duplicate task id (first declared at index {first_index})")]
    DuplicateId { task: String, first_index: usize },

    #[error("task {task}: unresolved dependency '{dependency}'")]
    UnresolvedDependency { task: String, dependency: String },

    #[error("circular dependency detected from task {task}: {}", .path.join(" -> "))]
    Cycle { task: String, path: Vec<String> },

    #[error(
        "task {task}: starts {start} before dependency {dependency} finishes {dependency_end}"
    )]
    TemporalOrdering {
        task: String,
        start: NaiveDate,
        dependency: String,
        dependency_end: NaiveDate,
    },
}

impl ValidationIssue {
    /// Label of the task the issue is reported against.
    pub fn task(&self) -> &str {
        match self {
            ValidationIssue::MissingField { task, .. }
            | ValidationIssue::InvalidField { task, .. }
            | ValidationIssue::InvalidDate { task, .. }
            | ValidationIssue::StartAfterEnd { task, .. }
            | ValidationIssue::ProgressOutOfRange { task, .. }
            | ValidationIssue::InvalidDependency { task, .. }
            | ValidationIssue::DuplicateId { task, .. }
            | ValidationIssue::UnresolvedDependency { task, .. }
            | ValidationIssue::Cycle { task, .. }
            | ValidationIssue::TemporalOrdering { task, .. } => task,
        }
    }

    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            ValidationIssue::UnresolvedDependency { .. }
                | ValidationIssue::Cycle { .. }
                | ValidationIssue::TemporalOrdering { .. }
        )
    }
}

impl Serialize for ValidationIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
