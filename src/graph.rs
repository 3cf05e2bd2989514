//! Dependency-graph analysis: dependent counts and cycle detection.
//!
//! The reverse adjacency and all traversal state live inside one call; no
//! graph state is cached across runs, since task sets change between calls.

use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::types::{GraphReport, Task};

/// Build the batch's dependency diagnostics.
///
/// Dependent counts only reflect relationships fully contained in the batch:
/// a forward reference to an id outside the batch is tolerated but never
/// counted. Done tasks still participate; a completed prerequisite keeps its
/// dependents on the books even though it will not be suggested itself.
pub fn analyze_graph(tasks: &[Task]) -> GraphReport {
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    // Reverse adjacency: who depends on whom. Duplicate declarations of the
    // same edge collapse to one dependent.
    let mut dependents: HashMap<&str, HashSet<&str>> = HashMap::new();
    for task in tasks {
        for dep in &task.dependencies {
            if ids.contains(dep.as_str()) {
                dependents
                    .entry(dep.as_str())
                    .or_default()
                    .insert(task.id.as_str());
            }
        }
    }

    let dependent_counts = tasks
        .iter()
        .map(|t| {
            let count = dependents.get(t.id.as_str()).map_or(0, HashSet::len);
            (t.id.clone(), count)
        })
        .collect();

    let cycles = detect_cycles(tasks, &ids);
    if !cycles.is_empty() {
        warn!(count = cycles.len(), "circular dependencies detected");
    }

    GraphReport {
        dependent_counts,
        cycles,
    }
}

/// Depth-first cycle detection over the forward-dependency graph.
///
/// Tracks the current path; reaching a node already on it closes a cycle,
/// reported as the id sequence from the first repeated node back around.
/// Self-loops surface as single-element cycles. Each distinct loop is
/// reported once regardless of which node the traversal entered it from.
fn detect_cycles(tasks: &[Task], ids: &HashSet<&str>) -> Vec<Vec<String>> {
    let forward: HashMap<&str, &[String]> = tasks
        .iter()
        .map(|t| (t.id.as_str(), t.dependencies.as_slice()))
        .collect();

    let mut visited: HashSet<&str> = HashSet::new();
    let mut seen_loops: HashSet<Vec<String>> = HashSet::new();
    let mut cycles = Vec::new();

    for task in tasks {
        if !visited.contains(task.id.as_str()) {
            let mut path = Vec::new();
            let mut on_path = HashSet::new();
            dfs(
                task.id.as_str(),
                &forward,
                ids,
                &mut visited,
                &mut path,
                &mut on_path,
                &mut seen_loops,
                &mut cycles,
            );
        }
    }

    cycles
}

#[allow(clippy::too_many_arguments)]
fn dfs<'a>(
    node: &'a str,
    forward: &HashMap<&'a str, &'a [String]>,
    ids: &HashSet<&str>,
    visited: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
    on_path: &mut HashSet<&'a str>,
    seen_loops: &mut HashSet<Vec<String>>,
    cycles: &mut Vec<Vec<String>>,
) {
    if on_path.contains(node) {
        let start = path.iter().position(|&n| n == node).unwrap_or(0);
        let cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
        // Canonical rotation so the same loop entered elsewhere dedupes.
        if seen_loops.insert(canonical_rotation(&cycle)) {
            cycles.push(cycle);
        }
        return;
    }
    if visited.contains(node) {
        return;
    }

    visited.insert(node);
    path.push(node);
    on_path.insert(node);

    if let Some(deps) = forward.get(node) {
        for dep in deps.iter() {
            if ids.contains(dep.as_str()) {
                dfs(
                    dep.as_str(),
                    forward,
                    ids,
                    visited,
                    path,
                    on_path,
                    seen_loops,
                    cycles,
                );
            }
        }
    }

    path.pop();
    on_path.remove(node);
}

/// Rotate a cycle so its lexicographically smallest id comes first. Used only
/// as a dedup key; reported cycles keep their traversal order.
fn canonical_rotation(cycle: &[String]) -> Vec<String> {
    let pivot = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| id.as_str())
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle[pivot..]
        .iter()
        .chain(cycle[..pivot].iter())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task {
            id: id.to_string(),
            description: String::new(),
            due_date: None,
            importance: None,
            effort_hours: None,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            done: false,
        }
    }

    #[test]
    fn dependent_counts_follow_reverse_edges() {
        let tasks = vec![
            task("a", &[]),
            task("b", &["a"]),
            task("c", &["a"]),
            task("d", &["b"]),
        ];
        let report = analyze_graph(&tasks);
        assert_eq!(report.dependent_count("a"), 2);
        assert_eq!(report.dependent_count("b"), 1);
        assert_eq!(report.dependent_count("c"), 0);
        assert_eq!(report.dependent_count("d"), 0);
    }

    #[test]
    fn dangling_references_are_not_counted() {
        let tasks = vec![task("a", &["ghost"]), task("b", &["a"])];
        let report = analyze_graph(&tasks);
        assert_eq!(report.dependent_count("a"), 1);
        assert!(!report.dependent_counts.contains_key("ghost"));
        assert!(report.cycles.is_empty());
    }

    #[test]
    fn duplicate_edge_declarations_count_once() {
        let tasks = vec![task("a", &[]), task("b", &["a", "a"])];
        let report = analyze_graph(&tasks);
        assert_eq!(report.dependent_count("a"), 1);
    }

    #[test]
    fn self_dependency_is_a_one_node_cycle() {
        let tasks = vec![task("a", &["a"])];
        let report = analyze_graph(&tasks);
        assert_eq!(report.cycles, vec![vec!["a".to_string()]]);
    }

    #[test]
    fn three_node_loop_is_reported_once() {
        let tasks = vec![task("a", &["b"]), task("b", &["c"]), task("c", &["a"])];
        let report = analyze_graph(&tasks);
        assert_eq!(report.cycles.len(), 1);
        let cycle = &report.cycles[0];
        assert_eq!(cycle.len(), 3);
        for id in ["a", "b", "c"] {
            assert!(cycle.contains(&id.to_string()));
        }
    }

    #[test]
    fn loop_found_once_regardless_of_start_order() {
        // Same loop, tasks listed in a different insertion order.
        let tasks = vec![task("c", &["a"]), task("a", &["b"]), task("b", &["c"])];
        let report = analyze_graph(&tasks);
        assert_eq!(report.cycles.len(), 1);
    }

    #[test]
    fn valid_chain_has_no_cycles() {
        let tasks = vec![task("a", &[]), task("b", &["a"]), task("c", &["b"])];
        let report = analyze_graph(&tasks);
        assert!(report.cycles.is_empty());
    }

    #[test]
    fn two_separate_loops_both_reported() {
        let tasks = vec![
            task("a", &["b"]),
            task("b", &["a"]),
            task("x", &["y"]),
            task("y", &["x"]),
        ];
        let report = analyze_graph(&tasks);
        assert_eq!(report.cycles.len(), 2);
    }
}
