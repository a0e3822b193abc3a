// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Reading and writing the serialized graph file (spec.md §6.1).

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::RouteError;
use crate::record::GraphFile;

/// Reads and parses a serialized graph file. The file handle is scoped to this call and closed
/// on every exit path, including a parse failure.
pub fn load(path: impl AsRef<Path>) -> Result<GraphFile, RouteError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let contents: GraphFile = serde_yaml::from_reader(reader)?;
    Ok(contents)
}

/// Serializes `contents` to `path`, overwriting it if it exists.
pub fn save(path: impl AsRef<Path>, contents: &GraphFile) -> Result<(), RouteError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_yaml::to_writer(writer, contents)?;
    Ok(())
}
