use crate::date::{format_day, inclusive_days};
use crate::task_validation::ParsedTask;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Progress assumed for staleness when a task declares none.
const ASSUMED_PROGRESS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub task_count: usize,
    pub total_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_progress: Option<f64>,
    pub overlapping_tasks: usize,
    pub error_count: usize,
    pub warnings: Vec<String>,
}

impl ScheduleStats {
    pub fn compute(tasks: &[ParsedTask], today: NaiveDate) -> Self {
        let earliest_start = tasks.iter().filter_map(|t| t.start).min();
        let latest_end = tasks.iter().filter_map(|t| t.end).max();
        let project_duration = match (earliest_start, latest_end) {
            (Some(start), Some(end)) => Some(inclusive_days(start, end)),
            _ => None,
        };

        // Reversed intervals are included; their day count is end - start + 1.
        let intervals: Vec<(NaiveDate, NaiveDate)> =
            tasks.iter().filter_map(ParsedTask::interval).collect();
        let total_days: i64 = intervals
            .iter()
            .map(|&(start, end)| inclusive_days(start, end))
            .sum();

        Self {
            task_count: tasks.len(),
            total_days,
            earliest_start,
            latest_end,
            project_duration,
            average_progress: average_progress(tasks),
            overlapping_tasks: count_overlaps(&intervals),
            error_count: 0,
            warnings: staleness_warnings(tasks, today),
        }
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        if let Some(date) = self.earliest_start {
            parts.push(format!("start={}", format_day(date)));
        }
        if let Some(date) = self.latest_end {
            parts.push(format!("end={}", format_day(date)));
        }
        if let Some(days) = self.project_duration {
            parts.push(format!("duration={}d", days));
        }
        parts.push(format!("work={}d", self.total_days));
        if let Some(avg) = self.average_progress {
            parts.push(format!("progress={:.1}%", avg));
        }
        parts.push(format!("overlaps={}", self.overlapping_tasks));
        if self.error_count > 0 {
            parts.push(format!("errors={}", self.error_count));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("warnings={}", self.warnings.len()));
        }
        parts.join(", ")
    }
}

/// Mean over tasks that declare a numeric progress, to one decimal.
fn average_progress(tasks: &[ParsedTask]) -> Option<f64> {
    let declared: Vec<f64> = tasks.iter().filter_map(|t| t.progress).collect();
    if declared.is_empty() {
        return None;
    }
    let mean = declared.iter().sum::<f64>() / declared.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Number of unordered pairs of day intervals `a`, `b` with
/// `a.start <= b.end && b.start <= a.end`.
///
/// Well-formed intervals are counted with a sort and sweep. Reversed ones
/// (`start > end`) are tested pairwise against everything after them.
pub fn count_overlaps(intervals: &[(NaiveDate, NaiveDate)]) -> usize {
    let (mut ordered, reversed): (Vec<_>, Vec<_>) = intervals
        .iter()
        .copied()
        .partition(|(start, end)| start <= end);
    ordered.sort();

    // With starts ascending, a later interval meets this one iff it starts
    // on or before this one's end.
    let swept: usize = ordered
        .iter()
        .enumerate()
        .map(|(i, &(_, end))| {
            ordered[i + 1..]
                .iter()
                .take_while(|(start, _)| *start <= end)
                .count()
        })
        .sum();

    let crossed: usize = reversed
        .iter()
        .enumerate()
        .map(|(i, &a)| {
            ordered
                .iter()
                .chain(&reversed[i + 1..])
                .filter(|&&b| intervals_meet(a, b))
                .count()
        })
        .sum();

    swept + crossed
}

fn intervals_meet(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

fn staleness_warnings(tasks: &[ParsedTask], today: NaiveDate) -> Vec<String> {
    tasks
        .iter()
        .filter_map(|task| {
            let end = task.end?;
            let progress = task.progress.unwrap_or(ASSUMED_PROGRESS);
            if end < today && progress < ASSUMED_PROGRESS {
                Some(format!(
                    "task {}: end date {} has passed (progress {}%)",
                    task.label,
                    format_day(end),
                    progress
                ))
            } else {
                None
            }
        })
        .collect()
}
