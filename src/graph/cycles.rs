use super::DependencyGraph;
use crate::error::ValidationIssue;
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// On the current DFS path, at this depth.
    OnPath(usize),
    Done,
}

/// Report a cycle for every task whose dependencies lead back into a cycle.
///
/// A DFS is started from every task in input order, so each task on a cycle
/// gets its own report. Nodes proven acyclic by an earlier search are skipped;
/// that only prunes subtrees in which no back edge can exist, so the cycle
/// found for each root is the same as a fresh search would find.
pub fn detect_cycles(dag: &DependencyGraph) -> Vec<ValidationIssue> {
    let adjacency = dag.adjacency();
    let mut cycle_free = vec![false; dag.node_count()];
    let mut issues = Vec::new();

    for root in dag.graph.node_indices() {
        if cycle_free[root.index()] {
            continue;
        }
        if let Some(cycle) = find_cycle_from(root, &adjacency, &mut cycle_free) {
            let path = cycle
                .iter()
                .map(|&node| dag.node(node).id.clone())
                .collect();
            issues.push(ValidationIssue::Cycle {
                task: dag.node(root).id.clone(),
                path,
            });
        }
    }

    issues
}

/// Iterative three-state DFS. Returns the first cycle reached from `root`,
/// closed by repeating its first node.
fn find_cycle_from(
    root: NodeIndex,
    adjacency: &[Vec<NodeIndex>],
    cycle_free: &mut [bool],
) -> Option<Vec<NodeIndex>> {
    let mut state: HashMap<NodeIndex, VisitState> = HashMap::new();
    // (node, next dependency to look at)
    let mut path: Vec<(NodeIndex, usize)> = vec![(root, 0)];
    state.insert(root, VisitState::OnPath(0));

    while let Some(&(node, cursor)) = path.last() {
        let Some(&next) = adjacency[node.index()].get(cursor) else {
            state.insert(node, VisitState::Done);
            cycle_free[node.index()] = true;
            path.pop();
            continue;
        };
        if let Some(top) = path.last_mut() {
            top.1 += 1;
        }
        if cycle_free[next.index()] {
            continue;
        }

        match state.get(&next).copied() {
            Some(VisitState::OnPath(depth)) => {
                let mut cycle: Vec<NodeIndex> = path[depth..].iter().map(|(n, _)| *n).collect();
                cycle.push(next);
                return Some(cycle);
            }
            Some(VisitState::Done) => {}
            None => {
                state.insert(next, VisitState::OnPath(path.len()));
                path.push((next, 0));
            }
        }
    }

    None
}
