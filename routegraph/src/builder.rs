// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Graph builder: consumes an ordered list of [`SystemRecord`]s and produces a [`Graph`] plus
//! the name↔id and tag-name↔tag-id bijections. This is the only place in the engine that ever
//! touches the string tables; everything downstream operates on dense integer ids.

use std::collections::HashMap;

use fixedbitset::FixedBitSet;
use log::debug;

use crate::error::RouteError;
use crate::graph::Graph;
use crate::ids::{NodeId, TagId};
use crate::record::SystemRecord;

/// The result of a successful build: the graph itself plus every lookup table a front-end
/// needs to translate between names and ids.
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    /// The constructed, read-only graph.
    pub graph: Graph,
    /// System name to node id.
    pub systems: HashMap<String, NodeId>,
    /// Node id to system name, indexed by `NodeId::index()`.
    pub system_names: Vec<String>,
    /// Tag name to tag id.
    pub tags: HashMap<String, TagId>,
    /// Tag id to tag name, indexed by `TagId::index()`.
    pub tag_names: Vec<String>,
    /// Security classification string per node, indexed by `NodeId::index()`.
    pub sec_status: Vec<String>,
}

/// Builds a [`BuiltGraph`] from a [`SystemRecord`] list. Node and tag ids are assigned densely
/// in input order, which is what keeps the serialize/deserialize round trip isomorphic.
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Creates a new builder. The builder itself carries no state between calls.
    pub fn new() -> Self {
        Self
    }

    /// Builds a graph from `records`, in order. Node ids and tag ids are assigned `0..N` and
    /// `0..T` in first-occurrence order. Returns [`RouteError::DataError`] if a `destinations`
    /// entry names a system not present in `records`, or if a name is duplicated.
    pub fn build(&self, records: Vec<SystemRecord>) -> Result<BuiltGraph, RouteError> {
        let mut systems: HashMap<String, NodeId> = HashMap::with_capacity(records.len());
        let mut system_names: Vec<String> = Vec::with_capacity(records.len());
        let mut tags: HashMap<String, TagId> = HashMap::new();
        let mut tag_names: Vec<String> = Vec::new();
        let mut sec_status: Vec<String> = Vec::with_capacity(records.len());

        for (i, record) in records.iter().enumerate() {
            let id = NodeId::from(i);
            if systems.insert(record.name.clone(), id).is_some() {
                return Err(RouteError::DataError(format!(
                    "duplicate system name {:?}",
                    record.name
                )));
            }
            system_names.push(record.name.clone());
            sec_status.push(record.sec_status.clone());

            for tag in &record.tags {
                if !tags.contains_key(tag) {
                    let tid = TagId::from(tag_names.len());
                    tags.insert(tag.clone(), tid);
                    tag_names.push(tag.clone());
                }
            }
        }

        let num_tags = tag_names.len();
        let mut neighbors: Vec<Vec<NodeId>> = Vec::with_capacity(records.len());
        let mut node_tags: Vec<FixedBitSet> = Vec::with_capacity(records.len());

        for record in &records {
            let mut dests = Vec::with_capacity(record.destinations.len());
            for dest_name in &record.destinations {
                let dest_id = systems
                    .get(dest_name)
                    .ok_or_else(|| RouteError::unknown_system(dest_name))?;
                dests.push(*dest_id);
            }
            neighbors.push(dests);

            let mut bitset = FixedBitSet::with_capacity(num_tags);
            for tag in &record.tags {
                bitset.insert(tags[tag].index());
            }
            node_tags.push(bitset);
        }

        debug!("built graph with {} systems, {} tags", records.len(), num_tags);

        Ok(BuiltGraph {
            graph: Graph::new(neighbors, node_tags, num_tags),
            systems,
            system_names,
            tags,
            tag_names,
            sec_status,
        })
    }
}
