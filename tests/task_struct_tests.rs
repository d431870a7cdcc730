use schedule_check::{
    DependencyKind, DependencyRef, Field, ScheduleInputError, TaskRecord, records_from_document,
};
use serde_json::json;

#[test]
fn builder_collects_dependencies_in_order() {
    let task = TaskRecord::new("3", "Build", "2024-01-05", "2024-01-09")
        .with_progress(40.0)
        .depends_on("1")
        .with_dependency(DependencyRef::new("2", DependencyKind::StartToStart));

    assert_eq!(task.id, Field::Valid("3".to_string()));
    assert_eq!(task.progress, Field::Valid(40.0));
    assert_eq!(
        task.dependency_refs(),
        &[
            DependencyRef::finish_to_start("1"),
            DependencyRef::new("2", DependencyKind::StartToStart),
        ]
    );
}

#[test]
fn single_object_document_is_promoted() {
    let doc = json!({"id": "1", "title": "Only", "startDate": "2024-01-01", "endDate": "2024-01-02"});
    let records = records_from_document(&doc).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, Field::Valid("Only".to_string()));
}

#[test]
fn array_document_keeps_input_order() {
    let doc = json!([{"id": "b"}, {"id": "a"}, {"id": "c"}]);
    let ids: Vec<_> = records_from_document(&doc)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            Field::Valid("b".to_string()),
            Field::Valid("a".to_string()),
            Field::Valid("c".to_string()),
        ]
    );
}

#[test]
fn empty_array_is_an_empty_task_set() {
    let records = records_from_document(&json!([])).unwrap();
    assert!(records.is_empty());
}

#[test]
fn scalar_documents_are_malformed() {
    for doc in [json!("tasks"), json!(3), json!(null), json!(true)] {
        let err = records_from_document(&doc).unwrap_err();
        assert!(matches!(err, ScheduleInputError::MalformedInput(_)));
    }
}

#[test]
fn array_with_non_object_element_is_malformed() {
    let doc = json!([{"id": "1"}, "2"]);
    let err = records_from_document(&doc).unwrap_err();
    assert!(err.to_string().contains("element 1"), "{err}");
}

#[test]
fn dependency_kind_labels_are_case_insensitive() {
    let doc = json!({"dependencies": [{"taskId": "a", "type": "Finish-To-Finish"}]});
    let records = records_from_document(&doc).unwrap();
    assert_eq!(records[0].dependency_refs()[0].kind, DependencyKind::FinishToFinish);
    assert_eq!(DependencyKind::FinishToFinish.to_string(), "finish-to-finish");
}

#[test]
fn non_list_dependencies_are_kept_as_invalid() {
    let doc = json!({"id": "1", "dependencies": "2"});
    let records = records_from_document(&doc).unwrap();
    assert_eq!(records[0].dependencies, Field::Invalid(json!("2")));
    assert!(records[0].dependency_refs().is_empty());
}
