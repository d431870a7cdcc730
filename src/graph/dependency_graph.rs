use crate::error::ValidationIssue;
use crate::task::DependencyKind;
use crate::task_validation::ParsedTask;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNode {
    /// Task label: its id, or `index_<n>` when it has none.
    pub id: String,
    /// Position of the task in the input document.
    pub task_index: usize,
}

/// Directed graph from each task to the tasks it depends on.
///
/// Every task gets a node, in input order, so `NodeIndex` equals the task's
/// input position. Only the first task declaring an id is reachable through
/// `id_to_index`; later tasks repeating it keep their own outgoing edges.
/// Edges are added in declaration order, so `EdgeIndex` order doubles as
/// declaration order.
pub struct DependencyGraph {
    pub graph: DiGraph<TaskNode, DependencyKind>,
    pub id_to_index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph, returning one `UnresolvedDependency` issue per
    /// reference to an unknown task id. Unresolved edges are left out.
    pub fn build(tasks: &[ParsedTask]) -> (Self, Vec<ValidationIssue>) {
        let mut graph: DiGraph<TaskNode, DependencyKind> =
            DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut id_to_index: HashMap<String, NodeIndex> = HashMap::new();

        // Add nodes first
        let mut nodes = Vec::with_capacity(tasks.len());
        for task in tasks {
            let node_ix = graph.add_node(TaskNode {
                id: task.label.clone(),
                task_index: task.index,
            });
            if let Some(id) = &task.graph_id {
                id_to_index.insert(id.clone(), node_ix);
            }
            nodes.push(node_ix);
        }

        // Edges: task -> dependency
        let mut unresolved = Vec::new();
        for (task, &from) in tasks.iter().zip(&nodes) {
            for dependency in &task.dependencies {
                match id_to_index.get(&dependency.task_id) {
                    Some(&to) => {
                        graph.add_edge(from, to, dependency.kind.clone());
                    }
                    None => unresolved.push(ValidationIssue::UnresolvedDependency {
                        task: task.label.clone(),
                        dependency: dependency.task_id.clone(),
                    }),
                }
            }
        }

        (Self { graph, id_to_index }, unresolved)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, index: NodeIndex) -> &TaskNode {
        &self.graph[index]
    }

    /// Dependencies of `node` with their kinds, in declaration order.
    pub fn dependencies_of(&self, node: NodeIndex) -> Vec<(NodeIndex, &DependencyKind)> {
        let mut edges: Vec<_> = self.graph.edges(node).collect();
        edges.sort_by_key(|edge| edge.id());
        edges
            .into_iter()
            .map(|edge| (edge.target(), edge.weight()))
            .collect()
    }

    /// Every dependency id of every task, as adjacency lists indexed by node.
    pub fn adjacency(&self) -> Vec<Vec<NodeIndex>> {
        self.graph
            .node_indices()
            .map(|node| {
                self.dependencies_of(node)
                    .into_iter()
                    .map(|(target, _)| target)
                    .collect()
            })
            .collect()
    }
}
