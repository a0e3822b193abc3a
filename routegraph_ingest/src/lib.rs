// routegraph_ingest: parses per-system descriptor files into routegraph SystemRecords
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Ingest pipeline for turning a tree of per-system descriptor files into the
//! [`routegraph::record::SystemRecord`]s a [`routegraph::builder::GraphBuilder`] consumes.
//!
//! ```no_run
//! let records = routegraph_ingest::ingest("./sde/systems", "./data", 20)?;
//! let built = routegraph::builder::GraphBuilder::new().build(records)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_debug_implementations)]

pub mod descriptor;
pub mod error;
pub mod pipeline;
pub mod taglist;

pub use error::IngestError;
pub use pipeline::ingest;
