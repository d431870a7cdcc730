use crate::calculations::{ScheduleStats, TemporalCheck};
use crate::error::{ScheduleInputError, ValidationIssue};
use crate::graph::{DependencyGraph, detect_cycles};
use crate::task::TaskRecord;
use crate::task_validation;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reference day for staleness warnings.
    pub today: NaiveDate,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }
}

impl ValidationOptions {
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub stats: ScheduleStats,
}

impl ValidationReport {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warnings(&self) -> &[String] {
        &self.stats.warnings
    }

    pub fn to_cli_summary(&self) -> String {
        let status = if self.is_valid { "valid" } else { "invalid" };
        format!("{status}: {}", self.stats.to_cli_summary())
    }
}

/// Read a task document: one task object, or an array of task objects.
pub fn records_from_document(document: &Value) -> Result<Vec<TaskRecord>, ScheduleInputError> {
    match document {
        Value::Object(object) => Ok(vec![TaskRecord::from_json(object)]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(object) => Ok(TaskRecord::from_json(object)),
                other => Err(ScheduleInputError::MalformedInput(format!(
                    "element {index} is {}, expected a task object",
                    json_kind(other)
                ))),
            })
            .collect(),
        other => Err(ScheduleInputError::MalformedInput(format!(
            "expected a task object or an array of task objects, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Runs the validation stages over one task set. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct ScheduleValidator {
    options: ValidationOptions,
}

impl ScheduleValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn validate_document(&self, document: &Value) -> Result<ValidationReport, ScheduleInputError> {
        let records = records_from_document(document)?;
        Ok(self.validate_tasks(&records))
    }

    pub fn validate_tasks(&self, records: &[TaskRecord]) -> ValidationReport {
        // Step 1: per-task structure
        let structural = task_validation::validate_task_collection(records);
        debug!(
            tasks = records.len(),
            issues = structural.issues.len(),
            "structural checks done"
        );
        let mut errors = structural.issues;
        let tasks = structural.tasks;

        // Step 2: dependency graph and cycles
        let (dag, unresolved) = DependencyGraph::build(&tasks);
        let cycles = detect_cycles(&dag);
        debug!(
            nodes = dag.node_count(),
            edges = dag.edge_count(),
            unresolved = unresolved.len(),
            cycles = cycles.len(),
            "dependency graph checked"
        );
        errors.extend(unresolved);
        errors.extend(cycles);

        // Step 3: finish-to-start ordering
        let temporal = TemporalCheck::new(&dag, &tasks).execute();
        debug!(issues = temporal.len(), "temporal ordering checked");
        errors.extend(temporal);

        // Step 4: statistics
        let mut stats = ScheduleStats::compute(&tasks, self.options.today);
        stats.error_count = errors.len();

        let report = ValidationReport {
            is_valid: errors.is_empty(),
            errors,
            stats,
        };
        info!(
            tasks = report.stats.task_count,
            errors = report.stats.error_count,
            warnings = report.stats.warnings.len(),
            valid = report.is_valid,
            "schedule validated"
        );
        report
    }
}
