// routegraph: a constrained multi-source shortest-path engine over a static tagged graph
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Module containing the dense integer id types used throughout the engine.

use std::fmt;

/// Identifies a system (node) by its dense index in `[0, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Identifies a tag by its dense index in `[0, T)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(pub u32);

impl NodeId {
    /// Returns this id as a `usize` index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TagId {
    /// Returns this id as a `usize` index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for NodeId {
    fn from(v: usize) -> Self {
        Self(v as u32)
    }
}

impl From<usize> for TagId {
    fn from(v: usize) -> Self {
        Self(v as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
