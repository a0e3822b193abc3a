// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Inner BFS: a constrained, level-synchronized, all-shortest-paths search from a single
//! source, ending either at an identified node or at any node carrying a given tag.
//!
//! The key trick (recording `distances[neighbor]` at the *predecessor's* depth rather than
//! the neighbor's own depth) is what lets every co-optimal predecessor at the same BFS level
//! extend its route into a shared neighbor. A naive "mark visited on first touch" prune would
//! silently drop co-optimal paths; see the module-level rationale in spec.md §4.2/§9.

use log::trace;

use crate::error::RouteError;
use crate::graph::Graph;
use crate::ids::{NodeId, TagId};

/// A route: a non-empty sequence of node ids, source-first, satisfying the target predicate
/// at the last position.
pub type Route = Vec<NodeId>;

/// The target predicate for a single BFS run.
#[derive(Debug, Clone, Copy)]
enum Target {
    Node(NodeId),
    Tag(TagId),
}

/// Parameters shared by both BFS variants.
#[derive(Debug, Clone, Copy)]
pub struct Constraints<'a> {
    /// Nodes that must never appear in a returned route.
    pub avoid_nodes: &'a [NodeId],
    /// Tags that must never appear on an interior node of a returned route.
    pub avoid_tags: &'a [TagId],
}

/// Runs the inner BFS to a specific destination node, returning every route of minimum length.
pub fn find_routes_to_node(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    constraints: Constraints<'_>,
) -> Result<Vec<Route>, RouteError> {
    if start == end {
        return Err(RouteError::NoRoute);
    }
    bfs(graph, start, Target::Node(end), constraints)
}

/// Runs the inner BFS to any node carrying `end_tag`, returning every route of minimum length.
pub fn find_routes_to_tag(
    graph: &Graph,
    start: NodeId,
    end_tag: TagId,
    constraints: Constraints<'_>,
) -> Result<Vec<Route>, RouteError> {
    if graph.has_tag(start, end_tag) {
        return Err(RouteError::NoRoute);
    }
    if constraints.avoid_tags.contains(&end_tag) {
        return Err(RouteError::NoRoute);
    }
    bfs(graph, start, Target::Tag(end_tag), constraints)
}

fn satisfies(graph: &Graph, node: NodeId, target: Target) -> bool {
    match target {
        Target::Node(end) => node == end,
        Target::Tag(end_tag) => graph.has_tag(node, end_tag),
    }
}

/// The shared level-synchronized expansion loop. See spec.md §4.2 for the exact semantics;
/// this function must preserve them precisely (distance recorded at predecessor depth, target
/// test position differing between node/tag targets, start-revisit suppressed).
fn bfs(
    graph: &Graph,
    start: NodeId,
    target: Target,
    constraints: Constraints<'_>,
) -> Result<Vec<Route>, RouteError> {
    let mut distances = vec![0i64; graph.num_nodes()];
    let mut candidates: Vec<Route> = vec![vec![start]];
    let mut found = false;

    loop {
        if found {
            let routes = candidates
                .into_iter()
                .filter(|c| satisfies(graph, *c.last().unwrap(), target))
                .collect();
            return Ok(routes);
        }

        let has_unreached = distances
            .iter()
            .enumerate()
            .any(|(i, &d)| i != start.index() && d == 0);
        if !has_unreached || candidates.is_empty() {
            return Err(RouteError::NoRoute);
        }

        let mut next_candidates: Vec<Route> = Vec::with_capacity(candidates.len());

        for candidate in &candidates {
            let curr = *candidate.last().unwrap();
            let depth_at_predecessor = (candidate.len() - 1) as i64;

            for neighbor in graph.neighbors(curr) {
                if neighbor == start {
                    continue;
                }

                // to-node target test happens before the backtracking prune.
                if let Target::Node(end) = target {
                    if neighbor == end {
                        distances[neighbor.index()] = depth_at_predecessor;
                        let mut extended = candidate.clone();
                        extended.push(neighbor);
                        next_candidates.push(extended);
                        found = true;
                        continue;
                    }
                }

                let d = distances[neighbor.index()];
                if d > 0 && d < depth_at_predecessor {
                    continue;
                }

                if constraints.avoid_nodes.contains(&neighbor) {
                    continue;
                }

                if graph.has_any_tag(neighbor, constraints.avoid_tags) {
                    continue;
                }

                if let Target::Tag(end_tag) = target {
                    if graph.has_tag(neighbor, end_tag) {
                        distances[neighbor.index()] = depth_at_predecessor;
                        let mut extended = candidate.clone();
                        extended.push(neighbor);
                        next_candidates.push(extended);
                        found = true;
                        continue;
                    }
                }

                distances[neighbor.index()] = depth_at_predecessor;
                let mut extended = candidate.clone();
                extended.push(neighbor);
                next_candidates.push(extended);
            }
        }

        trace!("bfs level expanded to {} candidates", next_candidates.len());
        candidates = next_candidates;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::record::SystemRecord;

    // A..F, edges A-B, B-C, C-D, A-E, E-D, B-F, F-D. hazard: {C}, slow: {F}.
    fn full_graph() -> (Graph, std::collections::HashMap<&'static str, NodeId>, std::collections::HashMap<&'static str, TagId>) {
        let records = vec![
            rec("A", &["B", "E"], &[]),
            rec("B", &["A", "C", "F"], &[]),
            rec("C", &["B", "D"], &["hazard"]),
            rec("D", &["C", "E", "F"], &[]),
            rec("E", &["A", "D"], &[]),
            rec("F", &["B", "D"], &["slow"]),
        ];
        let built = GraphBuilder::new().build(records).unwrap();
        let nodes: std::collections::HashMap<_, _> =
            built.systems.iter().map(|(name, id)| (leak(name), *id)).collect();
        let tags: std::collections::HashMap<_, _> =
            built.tags.iter().map(|(name, id)| (leak(name), *id)).collect();
        (built.graph, nodes, tags)
    }

    fn reduced_graph() -> (Graph, std::collections::HashMap<&'static str, NodeId>, std::collections::HashMap<&'static str, TagId>) {
        let records = vec![
            rec("A", &["B"], &[]),
            rec("B", &["A", "C", "F"], &[]),
            rec("C", &["B", "D"], &["hazard"]),
            rec("D", &["C", "E", "F"], &[]),
            rec("E", &["D"], &[]),
            rec("F", &["B", "D"], &["slow"]),
        ];
        let built = GraphBuilder::new().build(records).unwrap();
        let nodes: std::collections::HashMap<_, _> =
            built.systems.iter().map(|(name, id)| (leak(name), *id)).collect();
        let tags: std::collections::HashMap<_, _> =
            built.tags.iter().map(|(name, id)| (leak(name), *id)).collect();
        (built.graph, nodes, tags)
    }

    fn leak(s: &str) -> &'static str {
        Box::leak(s.to_string().into_boxed_str())
    }

    fn rec(name: &str, dest: &[&str], tags: &[&str]) -> SystemRecord {
        SystemRecord {
            id: 0,
            name: name.to_string(),
            constellation: "c".to_string(),
            region: "r".to_string(),
            destinations: dest.iter().map(|s| s.to_string()).collect(),
            sec_status: "high".to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn route_names(
        routes: &[Route],
        nodes: &std::collections::HashMap<&'static str, NodeId>,
    ) -> std::collections::HashSet<Vec<String>> {
        let rev: std::collections::HashMap<NodeId, &str> =
            nodes.iter().map(|(k, v)| (*v, *k)).collect();
        routes
            .iter()
            .map(|r| r.iter().map(|id| rev[id].to_string()).collect())
            .collect()
    }

    #[test]
    fn scenario_1_shortest_via_e() {
        let (graph, nodes, _tags) = full_graph();
        let routes = find_routes_to_node(
            &graph,
            nodes["A"],
            nodes["D"],
            Constraints { avoid_nodes: &[], avoid_tags: &[] },
        )
        .unwrap();
        let expected: std::collections::HashSet<Vec<String>> =
            [vec!["A".into(), "E".into(), "D".into()]].into_iter().collect();
        assert_eq!(route_names(&routes, &nodes), expected);
    }

    #[test]
    fn scenario_2_co_optimal_without_e() {
        let (graph, nodes, _tags) = reduced_graph();
        let routes = find_routes_to_node(
            &graph,
            nodes["A"],
            nodes["D"],
            Constraints { avoid_nodes: &[], avoid_tags: &[] },
        )
        .unwrap();
        let expected: std::collections::HashSet<Vec<String>> = [
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec!["A".into(), "B".into(), "F".into(), "D".into()],
        ]
        .into_iter()
        .collect();
        assert_eq!(route_names(&routes, &nodes), expected);
    }

    #[test]
    fn scenario_3_hard_avoid_hazard() {
        let (graph, nodes, tags) = reduced_graph();
        let routes = find_routes_to_node(
            &graph,
            nodes["A"],
            nodes["D"],
            Constraints { avoid_nodes: &[], avoid_tags: &[tags["hazard"]] },
        )
        .unwrap();
        let expected: std::collections::HashSet<Vec<String>> =
            [vec!["A".into(), "B".into(), "F".into(), "D".into()]].into_iter().collect();
        assert_eq!(route_names(&routes, &nodes), expected);
    }

    #[test]
    fn scenario_6_to_tag() {
        let (graph, nodes, tags) = full_graph();
        let routes = find_routes_to_tag(
            &graph,
            nodes["A"],
            tags["hazard"],
            Constraints { avoid_nodes: &[], avoid_tags: &[] },
        )
        .unwrap();
        let expected: std::collections::HashSet<Vec<String>> =
            [vec!["A".into(), "B".into(), "C".into()]].into_iter().collect();
        assert_eq!(route_names(&routes, &nodes), expected);
    }

    #[test]
    fn source_equals_target_is_no_route() {
        let (graph, nodes, _tags) = full_graph();
        let err = find_routes_to_node(
            &graph,
            nodes["A"],
            nodes["A"],
            Constraints { avoid_nodes: &[], avoid_tags: &[] },
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::NoRoute));
    }

    #[test]
    fn source_already_tagged_is_no_route() {
        let (graph, nodes, tags) = full_graph();
        let err = find_routes_to_tag(
            &graph,
            nodes["C"],
            tags["hazard"],
            Constraints { avoid_nodes: &[], avoid_tags: &[] },
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::NoRoute));
    }

    #[test]
    fn target_tag_hard_avoided_is_no_route() {
        let (graph, nodes, tags) = full_graph();
        let err = find_routes_to_tag(
            &graph,
            nodes["A"],
            tags["hazard"],
            Constraints { avoid_nodes: &[], avoid_tags: &[tags["hazard"]] },
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::NoRoute));
    }

    #[test]
    fn disconnected_is_no_route() {
        let records = vec![rec("A", &[], &[]), rec("B", &[], &[])];
        let built = GraphBuilder::new().build(records).unwrap();
        let a = built.systems["A"];
        let b = built.systems["B"];
        let err = find_routes_to_node(
            &built.graph,
            a,
            b,
            Constraints { avoid_nodes: &[], avoid_tags: &[] },
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::NoRoute));
    }
}
