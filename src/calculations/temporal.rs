use crate::error::ValidationIssue;
use crate::graph::DependencyGraph;
use crate::task::DependencyKind;
use crate::task_validation::ParsedTask;
use petgraph::graph::NodeIndex;
use tracing::debug;

pub struct TemporalCheck<'a> {
    dag: &'a DependencyGraph,
    tasks: &'a [ParsedTask],
}

impl<'a> TemporalCheck<'a> {
    pub fn new(dag: &'a DependencyGraph, tasks: &'a [ParsedTask]) -> Self {
        Self { dag, tasks }
    }

    /// Every finish-to-start edge requires the dependent task to start on or
    /// after the day its dependency ends. Edges with an unparsed date on
    /// either side are skipped; the structural pass already reported them.
    pub fn execute(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for node in self.dag.graph.node_indices() {
            let Some(task) = self.task_at(node) else {
                continue;
            };
            for (dep_node, kind) in self.dag.dependencies_of(node) {
                let Some(dependency) = self.task_at(dep_node) else {
                    continue;
                };
                if *kind != DependencyKind::FinishToStart {
                    debug!(
                        task = %task.label,
                        dependency = %dependency.label,
                        kind = %kind,
                        "no ordering rule for dependency kind; skipped"
                    );
                    continue;
                }

                if let (Some(start), Some(dependency_end)) = (task.start, dependency.end) {
                    if start < dependency_end {
                        issues.push(ValidationIssue::TemporalOrdering {
                            task: task.label.clone(),
                            start,
                            dependency: dependency.label.clone(),
                            dependency_end,
                        });
                    }
                }
            }
        }

        issues
    }

    fn task_at(&self, node: NodeIndex) -> Option<&'a ParsedTask> {
        self.tasks.get(self.dag.node(node).task_index)
    }
}
