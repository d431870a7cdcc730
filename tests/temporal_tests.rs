use chrono::NaiveDate;
use schedule_check::calculations::TemporalCheck;
use schedule_check::graph::DependencyGraph;
use schedule_check::task_validation::validate_task_collection;
use schedule_check::{DependencyKind, DependencyRef, TaskRecord, ValidationIssue};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn check(records: &[TaskRecord]) -> Vec<ValidationIssue> {
    let structural = validate_task_collection(records);
    let (dag, _) = DependencyGraph::build(&structural.tasks);
    TemporalCheck::new(&dag, &structural.tasks).execute()
}

#[test]
fn starting_a_day_before_the_dependency_ends_is_reported() {
    let records = vec![
        TaskRecord::new("T1", "Build", "2024-01-09", "2024-01-12").depends_on("T2"),
        TaskRecord::new("T2", "Design", "2024-01-01", "2024-01-10"),
    ];

    assert_eq!(
        check(&records),
        vec![ValidationIssue::TemporalOrdering {
            task: "T1".to_string(),
            start: d(2024, 1, 9),
            dependency: "T2".to_string(),
            dependency_end: d(2024, 1, 10),
        }]
    );
}

#[test]
fn starting_on_the_day_the_dependency_ends_is_allowed() {
    let records = vec![
        TaskRecord::new("T1", "Build", "2024-01-10", "2024-01-12").depends_on("T2"),
        TaskRecord::new("T2", "Design", "2024-01-01", "2024-01-10T17:00:00Z"),
    ];
    assert!(check(&records).is_empty());
}

#[test]
fn unparsed_dates_skip_the_check() {
    let records = vec![
        TaskRecord::new("T1", "Build", "not-a-date", "2024-01-12").depends_on("T2"),
        TaskRecord::new("T2", "Design", "2024-01-01", "2024-01-10"),
        TaskRecord::new("T3", "Ship", "2024-01-01", "2024-01-02").depends_on("T4"),
        TaskRecord::new("T4", "Test", "2024-01-01", "2024-13-40"),
    ];
    assert!(check(&records).is_empty());
}

#[test]
fn other_dependency_kinds_are_not_ordered() {
    let records = vec![
        TaskRecord::new("T1", "Build", "2024-01-01", "2024-01-12")
            .with_dependency(DependencyRef::new("T2", DependencyKind::StartToStart))
            .with_dependency(DependencyRef::new(
                "T2",
                DependencyKind::Other("lag".to_string()),
            )),
        TaskRecord::new("T2", "Design", "2024-01-01", "2024-01-10"),
    ];
    assert!(check(&records).is_empty());
}

#[test]
fn violations_follow_task_then_declaration_order() {
    let records = vec![
        TaskRecord::new("A", "A", "2024-02-01", "2024-02-02"),
        TaskRecord::new("B", "B", "2024-02-05", "2024-02-06"),
        TaskRecord::new("C", "C", "2024-02-01", "2024-02-09")
            .depends_on("B")
            .depends_on("A"),
        TaskRecord::new("D", "D", "2024-01-31", "2024-02-09").depends_on("A"),
    ];
    let labels: Vec<(String, String)> = check(&records)
        .into_iter()
        .map(|issue| match issue {
            ValidationIssue::TemporalOrdering {
                task, dependency, ..
            } => (task, dependency),
            other => panic!("unexpected issue {other:?}"),
        })
        .collect();

    assert_eq!(
        labels,
        vec![
            ("C".to_string(), "B".to_string()),
            ("C".to_string(), "A".to_string()),
            ("D".to_string(), "A".to_string()),
        ]
    );
}

#[test]
fn tasks_missing_from_the_slice_are_skipped() {
    let records = vec![
        TaskRecord::new("T1", "Build", "2024-01-09", "2024-01-12").depends_on("T2"),
        TaskRecord::new("T2", "Design", "2024-01-01", "2024-01-10"),
    ];
    let structural = validate_task_collection(&records);
    let (dag, _) = DependencyGraph::build(&structural.tasks);

    assert!(TemporalCheck::new(&dag, &structural.tasks[..1]).execute().is_empty());
    assert!(TemporalCheck::new(&dag, &[]).execute().is_empty());
}
