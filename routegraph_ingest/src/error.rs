// routegraph_ingest: parses per-system descriptor files into routegraph SystemRecords
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Module containing the ingest pipeline's error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while walking, parsing, or resolving raw descriptor files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reading a file or directory failed.
    #[error("io error at {path}: {source}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A `solarsystem.staticdata` file's path did not have the expected
    /// `region/constellation/system` shape.
    #[error("path {0} does not have the expected region/constellation/system shape")]
    BadPath(PathBuf),
    /// A descriptor file could not be decoded as YAML.
    #[error("could not decode {path}: {source}")]
    Decode {
        /// The path being decoded.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_yaml::Error,
    },
}
