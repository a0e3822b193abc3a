// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Module containing all error types

use thiserror::Error;

/// Main error type returned by the graph store, pathfinder, relaxation driver and builder.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The relaxation driver exhausted its schedule without finding any route. This is an
    /// expected outcome, not a bug: front-ends translate it to a 404 / non-zero exit.
    #[error("no route found")]
    NoRoute,
    /// The caller violated the query contract.
    #[error("bad input: {0}")]
    BadInput(String),
    /// The serialized graph is malformed or internally inconsistent.
    #[error("data error: {0}")]
    DataError(String),
    /// Reading or writing the serialized graph failed.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    /// The serialized graph could not be decoded.
    #[error("yaml error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl RouteError {
    /// Builds a [`RouteError::DataError`] naming the unknown destination system.
    pub fn unknown_system(name: &str) -> Self {
        Self::DataError(format!("destination system {name:?} is not defined"))
    }
}
