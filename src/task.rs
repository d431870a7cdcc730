use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A field as found in the input document.
///
/// Ingestion never fails on data-quality problems; it records what it saw so
/// the structural validator can report it.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Missing,
    /// Present, but with a JSON type that cannot be used for this field.
    Invalid(Value),
    Valid(T),
}

impl<T> Field<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            Field::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyKind {
    #[default]
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
    Other(String),
}

impl DependencyKind {
    pub fn as_str(&self) -> &str {
        match self {
            DependencyKind::FinishToStart => "finish-to-start",
            DependencyKind::StartToStart => "start-to-start",
            DependencyKind::FinishToFinish => "finish-to-finish",
            DependencyKind::StartToFinish => "start-to-finish",
            DependencyKind::Other(label) => label,
        }
    }
}

impl From<String> for DependencyKind {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "finish-to-start" => DependencyKind::FinishToStart,
            "start-to-start" => DependencyKind::StartToStart,
            "finish-to-finish" => DependencyKind::FinishToFinish,
            "start-to-finish" => DependencyKind::StartToFinish,
            _ => DependencyKind::Other(label),
        }
    }
}

impl From<DependencyKind> for String {
    fn from(kind: DependencyKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency on another task, whatever shape it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRef {
    pub task_id: String,
    pub kind: DependencyKind,
}

impl DependencyRef {
    pub fn new(task_id: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            task_id: task_id.into(),
            kind,
        }
    }

    pub fn finish_to_start(task_id: impl Into<String>) -> Self {
        Self::new(task_id, DependencyKind::FinishToStart)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDependency {
    Bare(TaskId),
    Edge {
        #[serde(rename = "taskId", alias = "id")]
        task_id: TaskId,
        #[serde(rename = "type", default)]
        kind: DependencyKind,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        match id {
            TaskId::Text(text) => text,
            TaskId::Signed(number) => number.to_string(),
            TaskId::Unsigned(number) => number.to_string(),
        }
    }
}

impl From<RawDependency> for DependencyRef {
    fn from(raw: RawDependency) -> Self {
        match raw {
            RawDependency::Bare(id) => DependencyRef::finish_to_start(id),
            RawDependency::Edge { task_id, kind } => DependencyRef::new(task_id, kind),
        }
    }
}

/// A dependency entry that could not be read, with its position in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidDependency {
    pub position: usize,
    pub value: Value,
}

/// One task as declared in the input document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskRecord {
    pub id: Field<String>,
    pub title: Field<String>,
    pub start_date: Field<String>,
    pub end_date: Field<String>,
    pub progress: Field<f64>,
    /// `Invalid` when `dependencies` is present but not a list.
    pub dependencies: Field<Vec<DependencyRef>>,
    pub invalid_dependencies: Vec<InvalidDependency>,
}

impl TaskRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id: Field::Valid(id.into()),
            title: Field::Valid(title.into()),
            start_date: Field::Valid(start_date.into()),
            end_date: Field::Valid(end_date.into()),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Field::Valid(progress);
        self
    }

    pub fn with_dependency(mut self, dependency: DependencyRef) -> Self {
        let mut list = match std::mem::take(&mut self.dependencies) {
            Field::Valid(list) => list,
            _ => Vec::new(),
        };
        list.push(dependency);
        self.dependencies = Field::Valid(list);
        self
    }

    pub fn depends_on(self, task_id: impl Into<String>) -> Self {
        self.with_dependency(DependencyRef::finish_to_start(task_id))
    }

    /// Readable dependency references, in declaration order.
    pub fn dependency_refs(&self) -> &[DependencyRef] {
        match &self.dependencies {
            Field::Valid(list) => list,
            _ => &[],
        }
    }

    pub fn from_json(object: &Map<String, Value>) -> Self {
        let (dependencies, invalid_dependencies) = read_dependencies(object.get("dependencies"));
        Self {
            id: read_id(object.get("id")),
            title: read_string(object.get("title")),
            start_date: read_string(object.get("startDate")),
            end_date: read_string(object.get("endDate")),
            progress: read_number(object.get("progress")),
            dependencies,
            invalid_dependencies,
        }
    }
}

fn read_id(value: Option<&Value>) -> Field<String> {
    match value {
        None => Field::Missing,
        Some(Value::String(text)) => Field::Valid(text.clone()),
        Some(Value::Number(number)) if number.is_i64() || number.is_u64() => {
            Field::Valid(number.to_string())
        }
        Some(other) => Field::Invalid(other.clone()),
    }
}

fn read_string(value: Option<&Value>) -> Field<String> {
    match value {
        None => Field::Missing,
        Some(Value::String(text)) => Field::Valid(text.clone()),
        Some(other) => Field::Invalid(other.clone()),
    }
}

fn read_number(value: Option<&Value>) -> Field<f64> {
    match value {
        None => Field::Missing,
        Some(Value::Number(number)) => match number.as_f64() {
            Some(n) => Field::Valid(n),
            None => Field::Invalid(Value::Number(number.clone())),
        },
        Some(other) => Field::Invalid(other.clone()),
    }
}

fn read_dependencies(
    value: Option<&Value>,
) -> (Field<Vec<DependencyRef>>, Vec<InvalidDependency>) {
    let entries = match value {
        None | Some(Value::Null) => return (Field::Missing, Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => return (Field::Invalid(other.clone()), Vec::new()),
    };

    let mut refs = Vec::with_capacity(entries.len());
    let mut invalid = Vec::new();
    for (position, entry) in entries.iter().enumerate() {
        match RawDependency::deserialize(entry) {
            Ok(raw) => refs.push(DependencyRef::from(raw)),
            Err(_) => invalid.push(InvalidDependency {
                position,
                value: entry.clone(),
            }),
        }
    }
    (Field::Valid(refs), invalid)
}
