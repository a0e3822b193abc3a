// routegraph_ingest: parses per-system descriptor files into routegraph SystemRecords
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! Parsing of a single `solarsystem.staticdata` descriptor file (spec.md §6.2).

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::IngestError;

/// The raw shape of one `solarsystem.staticdata` file.
#[derive(Debug, Deserialize)]
pub struct RawDescriptor {
    /// Security status, classified by [`classify_security`].
    pub security: f64,
    /// Gate id to stargate entry.
    #[serde(default)]
    pub stargates: HashMap<String, StargateEntry>,
}

/// One entry in a descriptor's `stargates` map.
#[derive(Debug, Deserialize)]
pub struct StargateEntry {
    /// The gate id this stargate leads to, on the far side.
    pub destination: String,
}

/// Reads and decodes a descriptor file. The file handle is scoped to this call.
pub fn parse(path: impl AsRef<Path>) -> Result<RawDescriptor, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;
    let reader = BufReader::new(file);
    serde_yaml::from_reader(reader).map_err(|source| IngestError::Decode { path: path.to_path_buf(), source })
}

/// Security classification (spec.md §6.2): `sec >= 0.5 => "high"`, `0.0 < sec < 0.5 => "low"`,
/// otherwise `"null"`. Tag-list membership may later override this to `"trig"`.
pub fn classify_security(sec: f64) -> &'static str {
    if sec >= 0.5 {
        "high"
    } else if sec > 0.0 {
        "low"
    } else {
        "null"
    }
}

/// The `region/constellation/system` components of a descriptor file's path, relative to the
/// ingest source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathComponents {
    /// Region directory name.
    pub region: String,
    /// Constellation directory name.
    pub constellation: String,
    /// System directory name.
    pub system: String,
}

/// Splits a descriptor file's path, relative to the source root, into its region,
/// constellation, and system components. Returns [`IngestError::BadPath`] if the relative path
/// does not have exactly three directory components before the filename.
pub fn split_path(relative: &Path) -> Result<PathComponents, IngestError> {
    let components: Vec<&str> = relative
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    match components.as_slice() {
        [region, constellation, system] => Ok(PathComponents {
            region: region.to_string(),
            constellation: constellation.to_string(),
            system: system.to_string(),
        }),
        _ => Err(IngestError::BadPath(relative.to_path_buf())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn classifies_security_thresholds() {
        assert_eq!(classify_security(0.9), "high");
        assert_eq!(classify_security(0.5), "high");
        assert_eq!(classify_security(0.4999), "low");
        assert_eq!(classify_security(0.0001), "low");
        assert_eq!(classify_security(0.0), "null");
        assert_eq!(classify_security(-0.5), "null");
    }

    #[test]
    fn splits_well_formed_path() {
        let components = split_path(&PathBuf::from(
            "The_Forge/Kimotoro/Jita/solarsystem.staticdata",
        ))
        .unwrap();
        assert_eq!(components.region, "The_Forge");
        assert_eq!(components.constellation, "Kimotoro");
        assert_eq!(components.system, "Jita");
    }

    #[test]
    fn rejects_wrong_depth() {
        assert!(split_path(&PathBuf::from("Jita/solarsystem.staticdata")).is_err());
    }
}
