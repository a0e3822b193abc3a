// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! The on-disk unit of the serialized graph file (spec.md §6.1): one system record.

use serde::{Deserialize, Serialize};

/// One system, as read from or written to the serialized graph file.
///
/// `destinations` names neighbors by system *name*, not id (the builder resolves names to
/// dense ids). `id` is carried through for round-trip fidelity with the original format but is
/// not trusted by the builder, which always reassigns dense ids in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    /// Dense id as assigned by whichever builder produced this record.
    pub id: u32,
    /// Unique human-readable name.
    pub name: String,
    /// Constellation name.
    pub constellation: String,
    /// Region name.
    pub region: String,
    /// Names of adjacent systems.
    pub destinations: Vec<String>,
    /// Security classification: "high" | "low" | "null" | "trig".
    pub sec_status: String,
    /// Tag names carried by this system.
    pub tags: Vec<String>,
}

/// The top-level shape of the serialized graph file: `SystemData: [SystemRecord]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphFile {
    /// The ordered sequence of system records.
    #[serde(rename = "SystemData")]
    pub system_data: Vec<SystemRecord>,
}
