use crate::date::parse_day;
use crate::error::{DateField, ValidationIssue};
use crate::task::{DependencyRef, Field, TaskRecord};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

const PROGRESS_MIN: f64 = 0.0;
const PROGRESS_MAX: f64 = 100.0;

/// The usable view of one task after structural checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTask {
    pub index: usize,
    /// Task id, or `index_<n>` when the task has no usable id.
    pub label: String,
    /// The id other tasks resolve to this task. `None` when the id is
    /// missing, unusable, or repeats an earlier task's id.
    pub graph_id: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub progress: Option<f64>,
    /// Readable dependency references, in declaration order.
    pub dependencies: Vec<DependencyRef>,
}

impl ParsedTask {
    pub fn interval(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct StructuralReport {
    pub tasks: Vec<ParsedTask>,
    pub issues: Vec<ValidationIssue>,
}

pub fn task_label(record: &TaskRecord, index: usize) -> String {
    match &record.id {
        Field::Valid(id) => id.clone(),
        _ => format!("index_{index}"),
    }
}

fn check_presence<T>(
    field: &Field<T>,
    key: &'static str,
    label: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match field {
        Field::Missing => issues.push(ValidationIssue::MissingField {
            task: label.to_string(),
            field: key,
        }),
        Field::Invalid(value) => issues.push(ValidationIssue::InvalidField {
            task: label.to_string(),
            field: key,
            value: value.to_string(),
        }),
        Field::Valid(_) => {}
    }
}

fn check_date(
    field: &Field<String>,
    which: DateField,
    label: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<NaiveDate> {
    let raw = match field {
        Field::Missing => {
            issues.push(ValidationIssue::MissingField {
                task: label.to_string(),
                field: which.key(),
            });
            return None;
        }
        Field::Invalid(value) => {
            issues.push(ValidationIssue::InvalidDate {
                task: label.to_string(),
                field: which,
                raw: render_raw(value),
            });
            return None;
        }
        Field::Valid(raw) => raw,
    };

    let parsed = parse_day(raw);
    if parsed.is_none() {
        issues.push(ValidationIssue::InvalidDate {
            task: label.to_string(),
            field: which,
            raw: raw.clone(),
        });
    }
    parsed
}

fn render_raw(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Run every per-task check, accumulating all problems.
pub fn validate_task(record: &TaskRecord, index: usize) -> (ParsedTask, Vec<ValidationIssue>) {
    let label = task_label(record, index);
    let mut issues = Vec::new();

    check_presence(&record.id, "id", &label, &mut issues);
    check_presence(&record.title, "title", &label, &mut issues);
    let start = check_date(&record.start_date, DateField::Start, &label, &mut issues);
    let end = check_date(&record.end_date, DateField::End, &label, &mut issues);

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            issues.push(ValidationIssue::StartAfterEnd {
                task: label.clone(),
                start,
                end,
            });
        }
    }

    let progress = match &record.progress {
        Field::Missing => None,
        Field::Invalid(value) => {
            issues.push(ValidationIssue::InvalidField {
                task: label.clone(),
                field: "progress",
                value: value.to_string(),
            });
            None
        }
        Field::Valid(pct) => {
            let pct = *pct;
            if !pct.is_finite() || !(PROGRESS_MIN..=PROGRESS_MAX).contains(&pct) {
                issues.push(ValidationIssue::ProgressOutOfRange {
                    task: label.clone(),
                    progress: pct,
                });
            }
            Some(pct)
        }
    };

    if let Field::Invalid(value) = &record.dependencies {
        issues.push(ValidationIssue::InvalidField {
            task: label.clone(),
            field: "dependencies",
            value: value.to_string(),
        });
    }
    for invalid in &record.invalid_dependencies {
        issues.push(ValidationIssue::InvalidDependency {
            task: label.clone(),
            position: invalid.position,
            value: invalid.value.to_string(),
        });
    }

    let parsed = ParsedTask {
        index,
        graph_id: record.id.valid().cloned(),
        label,
        start,
        end,
        progress,
        dependencies: record.dependency_refs().to_vec(),
    };
    (parsed, issues)
}

/// Validate every task in input order and mark repeated ids.
pub fn validate_task_collection(records: &[TaskRecord]) -> StructuralReport {
    let mut report = StructuralReport {
        tasks: Vec::with_capacity(records.len()),
        issues: Vec::new(),
    };
    let mut first_seen: HashMap<String, usize> = HashMap::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let (mut parsed, issues) = validate_task(record, index);
        report.issues.extend(issues);

        if let Some(id) = &parsed.graph_id {
            if let Some(&first_index) = first_seen.get(id) {
                report.issues.push(ValidationIssue::DuplicateId {
                    task: parsed.label.clone(),
                    first_index,
                });
                parsed.graph_id = None;
            } else {
                first_seen.insert(id.clone(), index);
            }
        }
        report.tasks.push(parsed);
    }

    report
}
