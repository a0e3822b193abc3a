// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Relaxation driver: wraps the inner BFS with the progressive soft-constraint escalation
//! protocol (spec.md §4.3) and, generalized over more than one source, the multi-source
//! phase A / phase B protocol (spec.md §4.4).
//!
//! Both protocols are really the same schedule: attempt everything with all soft tags
//! hard-avoided, then progressively drop soft tags (trying every combination of drops at a
//! given drop-count before moving to the next), pooling every route tied for minimum length at
//! whichever drop-count first yields a route. Multi-source search is this same schedule with
//! an extra dimension: at every escalation step, every source is tried and the pool spans the
//! source dimension too. So a single generic driver serves both; single-source callers just
//! pass a one-element source list.

use itertools::Itertools;
use log::debug;

use crate::error::RouteError;
use crate::ids::{NodeId, TagId};
use crate::pathfinder::Route;

/// Accumulates the best (shortest) result seen so far at a given escalation step, pooling every
/// route tied at that length. `None` until the first success (the `Option` sentinel called for
/// in spec.md §9's open question, in place of a zero-initialized length).
struct Best {
    length: usize,
    routes: Vec<Route>,
}

impl Best {
    fn offer(slot: &mut Option<Best>, routes: Vec<Route>) {
        let length = routes[0].len();
        match slot {
            None => *slot = Some(Best { length, routes }),
            Some(best) if length < best.length => {
                *slot = Some(Best { length, routes });
            }
            Some(best) if length == best.length => {
                best.routes.extend(routes);
            }
            Some(_) => {}
        }
    }
}

/// Runs the full relaxation schedule across `sources`, calling `run(source, avoid_tags)` for
/// every (source, avoid-tag-set) combination the schedule visits. `run` should perform exactly
/// one single-source BFS (see [`crate::pathfinder::find_routes_to_node`] /
/// [`crate::pathfinder::find_routes_to_tag`]) and propagate any error other than
/// [`RouteError::NoRoute`].
pub fn relax<F>(
    sources: &[NodeId],
    hard_avoid_tags: &[TagId],
    soft_avoid_tags: &[TagId],
    mut run: F,
) -> Result<Vec<Route>, RouteError>
where
    F: FnMut(NodeId, &[TagId]) -> Result<Vec<Route>, RouteError>,
{
    if sources.is_empty() {
        return Err(RouteError::BadInput("at least one source is required".into()));
    }

    // Attempt 0 / phase A: no soft tags relaxed.
    let mut all_avoided = hard_avoid_tags.to_vec();
    all_avoided.extend_from_slice(soft_avoid_tags);
    if let Some(best) = try_sources(sources, &all_avoided, &mut run)? {
        return Ok(best.routes);
    }

    // Attempts 1..=|P| / phase B: drop `i` soft tags at a time, trying every combination of
    // which ones to drop, pooling across both combinations and sources at a given drop count.
    let num_prefer = soft_avoid_tags.len();
    for drop_count in 1..=num_prefer {
        let keep_count = num_prefer - drop_count;
        let mut step_best: Option<Best> = None;

        for kept in soft_avoid_tags.iter().copied().combinations(keep_count) {
            let mut avoid_tags_plus = hard_avoid_tags.to_vec();
            avoid_tags_plus.extend(kept);

            if let Some(combo_best) = try_sources(sources, &avoid_tags_plus, &mut run)? {
                Best::offer(&mut step_best, combo_best.routes);
            }
        }

        if let Some(best) = step_best {
            debug!("relaxation succeeded after dropping {drop_count} soft tag(s)");
            return Ok(best.routes);
        }
    }

    Err(RouteError::NoRoute)
}

/// Tries every source with a fixed `avoid_tags` set, pooling the minimum-length results. `Ok(None)`
/// means every source returned `NoRoute`.
fn try_sources<F>(
    sources: &[NodeId],
    avoid_tags: &[TagId],
    run: &mut F,
) -> Result<Option<Best>, RouteError>
where
    F: FnMut(NodeId, &[TagId]) -> Result<Vec<Route>, RouteError>,
{
    let mut best: Option<Best> = None;
    for &source in sources {
        match run(source, avoid_tags) {
            Ok(routes) => Best::offer(&mut best, routes),
            Err(RouteError::NoRoute) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(best)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::pathfinder::{find_routes_to_node, Constraints};
    use crate::record::SystemRecord;

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

    // Reduced graph (no A-E edge): A-B, B-C, C-D, B-F, F-D. hazard: {C}, slow: {F}.
    fn reduced() -> crate::builder::BuiltGraph {
        let records = vec![
            rec("A", &["B"], &[]),
            rec("B", &["A", "C", "F"], &[]),
            rec("C", &["B", "D"], &["hazard"]),
            rec("D", &["C", "F"], &[]),
            rec("F", &["B", "D"], &["slow"]),
        ];
        GraphBuilder::new().build(records).unwrap()
    }

    fn names(routes: &[Route], built: &crate::builder::BuiltGraph) -> std::collections::HashSet<Vec<String>> {
        routes
            .iter()
            .map(|r| r.iter().map(|id| built.system_names[id.index()].clone()).collect())
            .collect()
    }

    #[test]
    fn scenario_4_soft_tag_escalation_pools_both_drops() {
        let built = reduced();
        let a = built.systems["A"];
        let d = built.systems["D"];
        let hazard = built.tags["hazard"];
        let slow = built.tags["slow"];

        let routes = relax(&[a], &[], &[hazard, slow], |src, avoid_tags| {
            find_routes_to_node(
                &built.graph,
                src,
                d,
                Constraints { avoid_nodes: &[], avoid_tags },
            )
        })
        .unwrap();

        let expected: std::collections::HashSet<Vec<String>> = [
            vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
            vec!["A".to_string(), "B".to_string(), "F".to_string(), "D".to_string()],
        ]
        .into_iter()
        .collect();
        assert_eq!(names(&routes, &built), expected);
    }

    #[test]
    fn scenario_5_multi_source_picks_shortest_overall() {
        let records = vec![
            rec("A", &["B", "E"], &[]),
            rec("B", &["A", "C", "F"], &[]),
            rec("C", &["B", "D"], &["hazard"]),
            rec("D", &["C", "E", "F"], &[]),
            rec("E", &["A", "D"], &[]),
            rec("F", &["B", "D"], &["slow"]),
        ];
        let built = GraphBuilder::new().build(records).unwrap();
        let a = built.systems["A"];
        let e = built.systems["E"];
        let d = built.systems["D"];

        let routes = relax(&[a, e], &[], &[], |src, avoid_tags| {
            find_routes_to_node(
                &built.graph,
                src,
                d,
                Constraints { avoid_nodes: &[], avoid_tags },
            )
        })
        .unwrap();

        let expected: std::collections::HashSet<Vec<String>> =
            [vec!["E".to_string(), "D".to_string()]].into_iter().collect();
        assert_eq!(names(&routes, &built), expected);
    }

    #[test]
    fn empty_soft_tags_is_single_attempt() {
        let built = reduced();
        let a = built.systems["A"];
        let d = built.systems["D"];
        let mut attempts = 0;
        let routes = relax(&[a], &[], &[], |src, avoid_tags| {
            attempts += 1;
            find_routes_to_node(&built.graph, src, d, Constraints { avoid_nodes: &[], avoid_tags })
        })
        .unwrap();
        assert_eq!(attempts, 1);
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn exhausted_schedule_is_no_route() {
        let built = reduced();
        let a = built.systems["A"];
        let d = built.systems["D"];
        let hazard = built.tags["hazard"];
        let slow = built.tags["slow"];
        let err = relax(&[a], &[hazard, slow], &[], |src, avoid_tags| {
            find_routes_to_node(&built.graph, src, d, Constraints { avoid_nodes: &[], avoid_tags })
        })
        .unwrap_err();
        assert!(matches!(err, RouteError::NoRoute));
    }
}
