// routegraph_ingest: parses per-system descriptor files into routegraph SystemRecords
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! The concurrent ingest pipeline: walks a source directory tree, parses every descriptor file
//! with a bounded worker pool, and resolves gate-id destinations into system names.
//!
//! The original implementation fans workers out over two hand-rolled channels consumed by
//! single-consumer aggregators; here the worker pool is `rayon`'s, and the aggregator is simply
//! the coordinator thread that calls `.collect()`, the idiomatic Rust shape for "bounded
//! parallel workers feeding a single coordinator" (spec.md §5, §9). Node ids are still assigned
//! only by the coordinator, after every worker has finished, never by a worker itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use routegraph::record::SystemRecord;

use crate::descriptor::{self, split_path};
use crate::error::IngestError;
use crate::taglist::TagLists;

const DESCRIPTOR_FILENAME: &str = "solarsystem.staticdata";

/// One system's parsed descriptor, before gate ids have been resolved to destination names.
struct ParsedSystem {
    name: String,
    region: String,
    constellation: String,
    sec_status: String,
    tags: Vec<String>,
    /// This system's own gate ids (empty for trig-final systems, whose edges are suppressed).
    own_gates: Vec<String>,
    /// The far-side gate id of each of this system's stargates, to be resolved into a
    /// destination system name in the coordinator's post-pass.
    dest_gate_refs: Vec<String>,
}

/// Runs the full ingest pipeline: walks `source_root` for descriptor files, loads the tag
/// lists from `data_dir`, parses every descriptor with up to `concurrency` worker threads, and
/// resolves gate references into a final, dense-id-free `Vec<SystemRecord>` (ids are assigned
/// by the caller's choice of builder, see [`routegraph::builder::GraphBuilder`]).
pub fn ingest(
    source_root: impl AsRef<Path>,
    data_dir: impl AsRef<Path>,
    concurrency: usize,
) -> Result<Vec<SystemRecord>, IngestError> {
    let source_root = source_root.as_ref();
    let tag_lists = TagLists::load_from(data_dir)?;

    let paths = walk(source_root);
    info!("found {} descriptor files under {}", paths.len(), source_root.display());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency.max(1))
        .build()
        .expect("failed to build ingest worker pool");

    let parsed: Vec<ParsedSystem> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| parse_one(source_root, path, &tag_lists))
            .collect::<Result<Vec<_>, IngestError>>()
    })?;

    Ok(resolve(parsed))
}

/// Enumerates every `solarsystem.staticdata` file under `source_root`. Non-matching files are
/// skipped with a warning, matching the original walker's tolerant behavior.
fn walk(source_root: &Path) -> Vec<PathBuf> {
    WalkDir::new(source_root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            if entry.file_name() == DESCRIPTOR_FILENAME {
                Some(entry.into_path())
            } else {
                warn!("skipping non-descriptor file {}", entry.path().display());
                None
            }
        })
        .collect()
}

fn parse_one(
    source_root: &Path,
    path: &Path,
    tag_lists: &TagLists,
) -> Result<ParsedSystem, IngestError> {
    let relative = path
        .strip_prefix(source_root)
        .map_err(|_| IngestError::BadPath(path.to_path_buf()))?;
    let components = split_path(relative)?;

    let raw = descriptor::parse(path)?;
    let mut sec_status = descriptor::classify_security(raw.security).to_string();

    let mut tags = vec![
        components.region.clone(),
        components.constellation.clone(),
        sec_status.clone(),
    ];

    let (extra_tag, forced_sec) = tag_lists.classify(&components.system);
    if let Some(tag) = extra_tag {
        tags.push(tag.to_string());
    }
    if let Some(forced) = forced_sec {
        sec_status = forced.to_string();
    }

    let is_trig_final = tag_lists.trig_final.contains(&components.system);
    let (own_gates, dest_gate_refs) = if is_trig_final {
        (Vec::new(), Vec::new())
    } else {
        raw.stargates
            .into_iter()
            .map(|(gate_id, entry)| (gate_id, entry.destination))
            .unzip()
    };

    Ok(ParsedSystem {
        name: components.system,
        region: components.region,
        constellation: components.constellation,
        sec_status,
        tags,
        own_gates,
        dest_gate_refs,
    })
}

/// The coordinator's post-pass: builds the gate-id→system-name table from every system's own
/// gates, then resolves each system's destination gate references through it. A destination
/// gate id with no owning system is silently dropped, matching the original's tolerant lookup.
fn resolve(parsed: Vec<ParsedSystem>) -> Vec<SystemRecord> {
    let mut gate_owner: HashMap<String, String> = HashMap::new();
    for system in &parsed {
        for gate_id in &system.own_gates {
            gate_owner.insert(gate_id.clone(), system.name.clone());
        }
    }

    parsed
        .into_iter()
        .enumerate()
        .map(|(id, system)| {
            let destinations = system
                .dest_gate_refs
                .iter()
                .filter_map(|gate_id| gate_owner.get(gate_id).cloned())
                .collect();

            SystemRecord {
                id: id as u32,
                name: system.name,
                constellation: system.constellation,
                region: system.region,
                destinations,
                sec_status: system.sec_status,
                tags: system.tags,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn write_system(root: &Path, region: &str, constellation: &str, system: &str, yaml: &str) {
        let dir = root.join(region).join(constellation).join(system);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DESCRIPTOR_FILENAME), yaml).unwrap();
    }

    #[test]
    fn ingests_two_connected_systems() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        for name in [
            "trig-final-lim.txt",
            "trig-minor-victory.txt",
            "edencom-minor-victory.txt",
            "edencom-fortress.txt",
        ] {
            fs::write(data.join(name), "").unwrap();
        }

        write_system(
            &source,
            "TheForge",
            "Kimotoro",
            "Jita",
            "security: 0.9\nstargates:\n  \"1\":\n    destination: \"2\"\n",
        );
        write_system(
            &source,
            "TheForge",
            "Kimotoro",
            "Perimeter",
            "security: 0.9\nstargates:\n  \"2\":\n    destination: \"1\"\n",
        );

        let records = ingest(&source, &data, 4).unwrap();
        assert_eq!(records.len(), 2);

        let jita = records.iter().find(|r| r.name == "Jita").unwrap();
        assert_eq!(jita.destinations, vec!["Perimeter".to_string()]);
        assert_eq!(jita.sec_status, "high");
        assert!(jita.tags.contains(&"TheForge".to_string()));
    }

    #[test]
    fn trig_final_system_has_no_outgoing_edges() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("trig-final-lim.txt"), "Turnur\n").unwrap();
        for name in [
            "trig-minor-victory.txt",
            "edencom-minor-victory.txt",
            "edencom-fortress.txt",
        ] {
            fs::write(data.join(name), "").unwrap();
        }

        write_system(
            &source,
            "Pochven",
            "C-C",
            "Turnur",
            "security: -0.5\nstargates:\n  \"1\":\n    destination: \"2\"\n",
        );

        let records = ingest(&source, &data, 2).unwrap();
        let turnur = &records[0];
        assert_eq!(turnur.sec_status, "trig");
        assert!(turnur.tags.contains(&"trig-final".to_string()));
        assert!(turnur.destinations.is_empty());
    }
}
