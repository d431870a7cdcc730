use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use schedule_check::calculations::count_overlaps;
use schedule_check::{ScheduleValidator, TaskRecord, ValidationIssue, ValidationOptions};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn validator() -> ScheduleValidator {
    ScheduleValidator::new(ValidationOptions::with_today(base()))
}

fn interval_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    // negative lengths give reversed intervals
    (0i64..120, -15i64..30).prop_map(|(offset, len)| {
        let start = base() + Duration::days(offset);
        (start, start + Duration::days(len))
    })
}

// Task i may only depend on tasks 0..i, so generated graphs are acyclic.
// Every task is one day long and starts after everything before it ends.
fn acyclic_plan_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<TaskRecord>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..4),
            num_tasks,
        )
        .prop_map(|raw_deps| {
            raw_deps
                .into_iter()
                .enumerate()
                .map(|(i, potential)| {
                    let day = (base() + Duration::days(i as i64)).format("%Y-%m-%d").to_string();
                    let mut task = TaskRecord::new(format!("t{i}"), format!("Task {i}"), &day, &day);
                    if i > 0 {
                        for dep in potential {
                            task = task.depends_on(format!("t{}", dep % i));
                        }
                    }
                    task
                })
                .collect()
        })
    })
}

fn pairwise_overlaps(intervals: &[(NaiveDate, NaiveDate)]) -> usize {
    let mut count = 0;
    for i in 0..intervals.len() {
        for j in (i + 1)..intervals.len() {
            let (a_start, a_end) = intervals[i];
            let (b_start, b_end) = intervals[j];
            if a_start <= b_end && b_start <= a_end {
                count += 1;
            }
        }
    }
    count
}

proptest! {
    #[test]
    fn sweep_matches_pairwise_overlap_count(
        intervals in proptest::collection::vec(interval_strategy(), 0..40)
    ) {
        prop_assert_eq!(count_overlaps(&intervals), pairwise_overlaps(&intervals));
    }

    #[test]
    fn acyclic_ordered_plans_are_valid(plan in acyclic_plan_strategy(25)) {
        let report = validator().validate_tasks(&plan);
        prop_assert!(report.is_valid, "{:?}", report.error_messages());
    }

    #[test]
    fn validation_is_deterministic(plan in acyclic_plan_strategy(15), back_edge in any::<usize>()) {
        // close one cycle so the cycle stage has something to report
        let mut plan = plan;
        let last = plan.len() - 1;
        let target = format!("t{last}");
        let index = back_edge % plan.len();
        plan[index] = plan[index].clone().depends_on(target);

        let first = validator().validate_tasks(&plan).error_messages();
        let second = validator().validate_tasks(&plan).error_messages();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn self_dependency_is_always_a_cycle(plan in acyclic_plan_strategy(15), pick in any::<usize>()) {
        let mut plan = plan;
        let index = pick % plan.len();
        let id = format!("t{index}");
        plan[index] = plan[index].clone().depends_on(id.clone());

        let report = validator().validate_tasks(&plan);
        let reported = report.errors.iter().any(|issue| matches!(
            issue,
            ValidationIssue::Cycle { task, .. } if *task == id
        ));
        prop_assert!(reported, "{:?}", report.error_messages());
    }

    #[test]
    fn error_count_matches_errors(plan in acyclic_plan_strategy(10), pick in any::<usize>()) {
        let mut plan = plan;
        let index = pick % plan.len();
        plan[index] = plan[index].clone().depends_on("missing").with_progress(150.0);

        let report = validator().validate_tasks(&plan);
        prop_assert!(!report.is_valid);
        prop_assert_eq!(report.stats.error_count, report.errors.len());
    }
}
