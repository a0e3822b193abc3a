// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

#![deny(missing_debug_implementations)]

//! # routegraph
//!
//! A constrained, multi-source, multi-target, all-shortest-paths engine over a static,
//! undirected, unit-weight graph of named systems carrying categorical tags.
//!
//! ## Example
//!
//! ```rust
//! use routegraph::builder::GraphBuilder;
//! use routegraph::engine::RouteEngine;
//! use routegraph::record::SystemRecord;
//!
//! fn rec(name: &str, dest: &[&str]) -> SystemRecord {
//!     SystemRecord {
//!         id: 0,
//!         name: name.into(),
//!         constellation: "c".into(),
//!         region: "r".into(),
//!         destinations: dest.iter().map(|s| s.to_string()).collect(),
//!         sec_status: "high".into(),
//!         tags: vec![],
//!     }
//! }
//!
//! let records = vec![rec("A", &["B"]), rec("B", &["A", "C"]), rec("C", &["B"])];
//! let built = GraphBuilder::new().build(records).unwrap();
//! let engine = RouteEngine::new(built.graph);
//!
//! let routes = engine
//!     .find_routes_to_node(&[built.systems["A"]], built.systems["C"], &[], &[], &[])
//!     .unwrap();
//! assert_eq!(routes.len(), 1);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod graph;
pub mod ids;
pub mod io;
pub mod pathfinder;
pub mod record;
pub mod relax;

pub use builder::{BuiltGraph, GraphBuilder};
pub use engine::RouteEngine;
pub use error::RouteError;
pub use graph::Graph;
pub use ids::{NodeId, TagId};
pub use pathfinder::Route;
pub use record::{GraphFile, SystemRecord};
