pub mod calculations;
pub mod date;
pub mod error;
pub mod graph;
#[cfg(feature = "cli")]
pub mod logging;
pub mod schedule;
pub mod task;
pub mod task_validation;

pub use calculations::ScheduleStats;
pub use date::parse_day;
pub use error::{DateField, ScheduleInputError, ValidationIssue};
pub use schedule::{
    ScheduleValidator, ValidationOptions, ValidationReport, records_from_document,
};
pub use task::{DependencyKind, DependencyRef, Field, TaskRecord};

use serde_json::Value;

/// Validate a task document with the given options.
pub fn validate_schedule(
    document: &Value,
    options: ValidationOptions,
) -> Result<ValidationReport, ScheduleInputError> {
    ScheduleValidator::new(options).validate_document(document)
}
