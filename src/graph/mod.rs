pub mod cycles;
pub mod dependency_graph;

pub use cycles::detect_cycles;
pub use dependency_graph::{DependencyGraph, TaskNode};
