/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */

//! Loading and writing pool and allocation documents.
//!
//! A document is TOML, YAML or JSON, picked by the file extension.

use std::fmt;
use std::path::Path;

use ipam::IpamPool;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(DocumentError::UnsupportedFormat {
                path: path.to_string_lossy().to_string(),
            }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => write!(f, "TOML"),
            Self::Yaml => write!(f, "YAML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("Could not read document: {path}: {error}")]
    CouldNotRead { path: String, error: std::io::Error },
    #[error("Could not write document: {path}: {error}")]
    CouldNotWrite { path: String, error: std::io::Error },
    #[error("Invalid TOML in document: {path}: {error}")]
    InvalidToml {
        path: String,
        error: toml::de::Error,
    },
    #[error("Invalid YAML in document: {path}: {error}")]
    InvalidYaml {
        path: String,
        error: serde_yaml::Error,
    },
    #[error("Invalid JSON in document: {path}: {error}")]
    InvalidJson {
        path: String,
        error: serde_json::Error,
    },
    #[error("Unsupported document format: {path} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },
    #[error("Could not encode document as {format}: {reason}")]
    CouldNotEncode {
        format: DocumentFormat,
        reason: String,
    },
}

/// A pool document holds either a single pool or several under `pools`.
/// Several pools are applied one after the other.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PoolDocument {
    Many { pools: Vec<IpamPool> },
    One(IpamPool),
}

impl PoolDocument {
    pub fn into_pools(self) -> Vec<IpamPool> {
        match self {
            Self::Many { pools } => pools,
            Self::One(pool) => vec![pool],
        }
    }
}

pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, DocumentError> {
    let format = DocumentFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|error| DocumentError::CouldNotRead {
        path: path.to_string_lossy().to_string(),
        error,
    })?;
    parse(&text, format, path)
}

fn parse<T: DeserializeOwned>(
    text: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<T, DocumentError> {
    let path = path.to_string_lossy().to_string();
    match format {
        DocumentFormat::Toml => {
            toml::from_str(text).map_err(|error| DocumentError::InvalidToml { path, error })
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|error| DocumentError::InvalidYaml { path, error })
        }
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|error| DocumentError::InvalidJson { path, error })
        }
    }
}

pub fn render<T: Serialize>(value: &T, format: DocumentFormat) -> Result<String, DocumentError> {
    let encoded = match format {
        DocumentFormat::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::to_string_pretty(value)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
    };
    encoded.map_err(|reason| DocumentError::CouldNotEncode { format, reason })
}

/// Writes `value` to `path` in the format its extension names.
pub fn save<T: Serialize>(value: &T, path: &Path) -> Result<(), DocumentError> {
    let text = render(value, DocumentFormat::from_path(path)?)?;
    std::fs::write(path, text).map_err(|error| DocumentError::CouldNotWrite {
        path: path.to_string_lossy().to_string(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::num::NonZeroU32;

    use ipam::{Cluster, DatacenterAllocations, PoolDatacenterSettings, apply};

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("could not create temp file");
        file.write_all(contents.as_bytes())
            .expect("could not write temp file");
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("pool.toml")).unwrap(),
            DocumentFormat::Toml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("dir/table.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("table.json")).unwrap(),
            DocumentFormat::Json
        );
        assert!(matches!(
            DocumentFormat::from_path(Path::new("table.txt")),
            Err(DocumentError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            DocumentFormat::from_path(Path::new("table")),
            Err(DocumentError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_load_single_pool_from_toml() {
        let file = write_temp(
            ".toml",
            r#"
name = "pool1"

[datacenters.aws-eu-1]
type = "range"
poolCidr = "192.168.1.0/28"
allocationRange = 8

[datacenters.azure-as-2]
type = "prefix"
poolCidr = "192.168.0.0/16"
allocationPrefix = 28
"#,
        );

        let pools = load::<PoolDocument>(file.path()).unwrap().into_pools();
        assert_eq!(pools.len(), 1);
        assert_eq!(
            pools[0],
            IpamPool::new("pool1")
                .with_datacenter(
                    "aws-eu-1",
                    PoolDatacenterSettings::range("192.168.1.0/28", NonZeroU32::new(8).unwrap()),
                )
                .with_datacenter(
                    "azure-as-2",
                    PoolDatacenterSettings::prefix("192.168.0.0/16", 28),
                )
        );
    }

    #[test]
    fn test_load_pool_list_from_yaml() {
        let file = write_temp(
            ".yaml",
            r#"
pools:
  - name: pool1
    datacenters:
      dc1: { type: range, poolCidr: 10.0.0.0/24, allocationRange: 4 }
  - name: pool2
    datacenters:
      dc1: { type: prefix, poolCidr: 10.1.0.0/16, allocationPrefix: 24 }
"#,
        );

        let pools = load::<PoolDocument>(file.path()).unwrap().into_pools();
        let names: Vec<_> = pools.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["pool1", "pool2"]);
    }

    #[test]
    fn test_invalid_documents() {
        let file = write_temp(".json", "{ not json");
        assert!(matches!(
            load::<DatacenterAllocations>(file.path()),
            Err(DocumentError::InvalidJson { .. })
        ));

        let file = write_temp(".toml", "name = ");
        assert!(matches!(
            load::<PoolDocument>(file.path()),
            Err(DocumentError::InvalidToml { .. })
        ));

        let missing = Path::new("/nonexistent/ipam/table.yaml");
        assert!(matches!(
            load::<DatacenterAllocations>(missing),
            Err(DocumentError::CouldNotRead { .. })
        ));
    }

    // save_and_load_applied_table ensures an applied table survives a write
    // and read in both YAML and JSON.
    #[test]
    fn save_and_load_applied_table() {
        let mut table = DatacenterAllocations::new();
        table.insert(
            "dc1".to_string(),
            vec![Cluster::new("c1"), Cluster::new("c2")],
        );
        let pool = IpamPool::new("pool1")
            .with_datacenter(
                "dc1",
                PoolDatacenterSettings::range("10.0.0.0/29", NonZeroU32::new(3).unwrap()),
            );
        apply(&mut table, &pool).unwrap();

        let dir = tempfile::tempdir().unwrap();
        for name in ["table.yaml", "table.json"] {
            let path = dir.path().join(name);
            save(&table, &path).unwrap();
            let loaded: DatacenterAllocations = load(&path).unwrap();
            assert_eq!(loaded, table, "{name}");
        }
    }
}
