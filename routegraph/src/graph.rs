// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Graph store: an immutable-after-load representation of the node set, adjacency, and
//! per-node tag membership.
//!
//! All structures are allocated once at build time (see [`crate::builder`]) and never resized.
//! Reading from a [`Graph`] requires no locking: any number of queries may read it concurrently.

use fixedbitset::FixedBitSet;

use crate::ids::{NodeId, TagId};

/// The static, read-only graph of systems queried by the pathfinder.
#[derive(Debug, Clone)]
pub struct Graph {
    neighbors: Vec<Vec<NodeId>>,
    tags: Vec<FixedBitSet>,
    num_tags: usize,
}

impl Graph {
    /// Builds a graph from per-node neighbor lists and per-node tag sets.
    ///
    /// `neighbors[i]` and `tags[i]` must both describe node `i`; both vectors must have the
    /// same length, and every neighbor id and tag id must be valid for the given sizes.
    pub fn new(neighbors: Vec<Vec<NodeId>>, tags: Vec<FixedBitSet>, num_tags: usize) -> Self {
        debug_assert_eq!(neighbors.len(), tags.len());
        Self { neighbors, tags, num_tags }
    }

    /// Number of nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of distinct tags in the graph's tag universe.
    pub fn num_tags(&self) -> usize {
        self.num_tags
    }

    /// Iterates over the outgoing neighbor ids of `v`, in insertion order.
    pub fn neighbors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors[v.index()].iter().copied()
    }

    /// True iff `v` is tagged with `t`.
    pub fn has_tag(&self, v: NodeId, t: TagId) -> bool {
        self.tags[v.index()].contains(t.index())
    }

    /// True iff `v` carries any tag in `tags`.
    pub fn has_any_tag(&self, v: NodeId, tags: &[TagId]) -> bool {
        tags.iter().any(|&t| self.has_tag(v, t))
    }
}
