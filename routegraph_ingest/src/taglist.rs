// routegraph_ingest: parses per-system descriptor files into routegraph SystemRecords
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Plain-text tag-list files: one system name per line, blank lines skipped, whitespace
//! trimmed (spec.md §6.2).

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::IngestError;

/// Loads a tag-list file into a set of system names.
pub fn load(path: impl AsRef<Path>) -> Result<HashSet<String>, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;
    let reader = BufReader::new(file);

    let mut names = HashSet::new();
    for line in reader.lines() {
        let line = line.map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        names.insert(trimmed.to_string());
    }
    Ok(names)
}

/// The four recognized tag lists (spec.md §6.2), loaded from a data directory.
#[derive(Debug, Clone, Default)]
pub struct TagLists {
    /// Systems whose final Triglavian invasion ends in total control: overrides `sec_status`
    /// to `"trig"` and suppresses outgoing edges.
    pub trig_final: HashSet<String>,
    /// Systems with a minor Triglavian victory.
    pub trig_minor: HashSet<String>,
    /// Systems with a minor EDENCOM victory.
    pub eden_minor: HashSet<String>,
    /// Systems fortified by EDENCOM.
    pub eden_fortress: HashSet<String>,
}

impl TagLists {
    /// Loads all four recognized tag lists from `data_dir`.
    pub fn load_from(data_dir: impl AsRef<Path>) -> Result<Self, IngestError> {
        let data_dir = data_dir.as_ref();
        Ok(Self {
            trig_final: load(data_dir.join("trig-final-lim.txt"))?,
            trig_minor: load(data_dir.join("trig-minor-victory.txt"))?,
            eden_minor: load(data_dir.join("edencom-minor-victory.txt"))?,
            eden_fortress: load(data_dir.join("edencom-fortress.txt"))?,
        })
    }

    /// Returns the extra tag and forced security status, if any, that `system_name`'s
    /// membership in these lists implies. `trig-final` takes priority over the other three,
    /// matching the original ingest's `if`/`else if` chain.
    pub fn classify(&self, system_name: &str) -> (Option<&'static str>, Option<&'static str>) {
        if self.trig_final.contains(system_name) {
            (Some("trig-final"), Some("trig"))
        } else if self.trig_minor.contains(system_name) {
            (Some("trig-minor"), None)
        } else if self.eden_minor.contains(system_name) {
            (Some("eden-minor"), None)
        } else if self.eden_fortress.contains(system_name) {
            (Some("eden-fortress"), None)
        } else {
            (None, None)
        }
    }
}
