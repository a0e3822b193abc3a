// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! The public query surface: the four entry points from spec.md §2, {single-source,
//! multi-source} x {target-node, target-tag}, each wrapped in the soft-constraint relaxation
//! protocol. Single-source is simply the one-element-source-list case; there is no separate
//! code path to keep in sync.

use crate::error::RouteError;
use crate::graph::Graph;
use crate::ids::{NodeId, TagId};
use crate::pathfinder::{self, Constraints, Route};
use crate::relax::relax;

/// A ready-to-query graph. Cheap to share: queries take `&self` and allocate only their own
/// temporary frontier structures.
#[derive(Debug, Clone)]
pub struct RouteEngine {
    graph: Graph,
}

impl RouteEngine {
    /// Wraps an already-built [`Graph`] for querying.
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// The underlying graph store.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Finds every minimum-length route from any of `sources` to `end`, honoring as many of
    /// `soft_avoid_tags` as feasible before shortening the search further.
    pub fn find_routes_to_node(
        &self,
        sources: &[NodeId],
        end: NodeId,
        avoid_nodes: &[NodeId],
        hard_avoid_tags: &[TagId],
        soft_avoid_tags: &[TagId],
    ) -> Result<Vec<Route>, RouteError> {
        relax(sources, hard_avoid_tags, soft_avoid_tags, |source, avoid_tags| {
            pathfinder::find_routes_to_node(
                &self.graph,
                source,
                end,
                Constraints { avoid_nodes, avoid_tags },
            )
        })
    }

    /// Finds every minimum-length route from any of `sources` to any node carrying `end_tag`.
    pub fn find_routes_to_tag(
        &self,
        sources: &[NodeId],
        end_tag: TagId,
        avoid_nodes: &[NodeId],
        hard_avoid_tags: &[TagId],
        soft_avoid_tags: &[TagId],
    ) -> Result<Vec<Route>, RouteError> {
        relax(sources, hard_avoid_tags, soft_avoid_tags, |source, avoid_tags| {
            pathfinder::find_routes_to_tag(
                &self.graph,
                source,
                end_tag,
                Constraints { avoid_nodes, avoid_tags },
            )
        })
    }
}
