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
use std::collections::BTreeMap;
use std::fmt::Display;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// The root object reconciliation works on: every datacenter and the clusters
/// deployed in it, in a caller-defined order. Cluster order within a
/// datacenter is the order allocations are handed out in.
pub type DatacenterAllocations = BTreeMap<String, Vec<Cluster>>;

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AllocationType {
    Range,
    Prefix,
}

impl Display for AllocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationType::Range => write!(f, "range"),
            AllocationType::Prefix => write!(f, "prefix"),
        }
    }
}

/// A named pool, configured independently per datacenter. The name is the
/// pool's identity: a cluster holding an allocation under this name is
/// considered served by the pool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IpamPool {
    pub name: String,
    #[serde(default)]
    pub datacenters: BTreeMap<String, PoolDatacenterSettings>,
}

impl IpamPool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datacenters: BTreeMap::new(),
        }
    }

    pub fn with_datacenter(
        mut self,
        datacenter: impl Into<String>,
        settings: PoolDatacenterSettings,
    ) -> Self {
        self.datacenters.insert(datacenter.into(), settings);
        self
    }
}

/// How a pool hands out address space in one datacenter.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PoolDatacenterSettings {
    /// Each cluster gets `allocation_range` individual addresses.
    #[serde(rename_all = "camelCase")]
    Range {
        pool_cidr: String,
        allocation_range: NonZeroU32,
    },
    /// Each cluster gets one subnet of length `allocation_prefix`.
    #[serde(rename_all = "camelCase")]
    Prefix {
        pool_cidr: String,
        allocation_prefix: u8,
    },
}

impl PoolDatacenterSettings {
    pub fn range(pool_cidr: impl Into<String>, allocation_range: NonZeroU32) -> Self {
        Self::Range {
            pool_cidr: pool_cidr.into(),
            allocation_range,
        }
    }

    pub fn prefix(pool_cidr: impl Into<String>, allocation_prefix: u8) -> Self {
        Self::Prefix {
            pool_cidr: pool_cidr.into(),
            allocation_prefix,
        }
    }

    pub fn pool_cidr(&self) -> &str {
        match self {
            Self::Range { pool_cidr, .. } | Self::Prefix { pool_cidr, .. } => pool_cidr,
        }
    }

    pub fn allocation_type(&self) -> AllocationType {
        match self {
            Self::Range { .. } => AllocationType::Range,
            Self::Prefix { .. } => AllocationType::Prefix,
        }
    }
}

/// Address space held by one cluster from one pool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IpamAllocation {
    pub ipam_pool_name: String,
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub datacenter: String,
    #[serde(flatten)]
    pub assignment: Assignment,
}

impl IpamAllocation {
    pub fn allocation_type(&self) -> AllocationType {
        self.assignment.allocation_type()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Assignment {
    /// Ordered `first-last` range strings. The order is the order they were
    /// handed out in and carries no other meaning.
    Range { addresses: Vec<String> },
    /// A single `network/len` subnet.
    Prefix { cidr: String },
}

impl Assignment {
    pub fn allocation_type(&self) -> AllocationType {
        match self {
            Assignment::Range { .. } => AllocationType::Range,
            Assignment::Prefix { .. } => AllocationType::Prefix,
        }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assignment::Range { addresses } => write!(f, "{}", addresses.join(",")),
            Assignment::Prefix { cidr } => write!(f, "{cidr}"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    #[serde(default)]
    pub ipam_allocations: Vec<IpamAllocation>,
}

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ipam_allocations: Vec::new(),
        }
    }

    /// The allocation this cluster holds from `pool`, if any. A cluster holds
    /// at most one allocation per pool name.
    pub fn allocation_for(&self, pool: &str) -> Option<&IpamAllocation> {
        self.ipam_allocations
            .iter()
            .find(|allocation| allocation.ipam_pool_name == pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pool_spec() {
        let pool: IpamPool = serde_json::from_str(
            r#"{
                "name": "pool1",
                "datacenters": {
                    "aws-eu-1": {"type": "range", "poolCidr": "192.168.1.0/28", "allocationRange": 8},
                    "azure-as-2": {"type": "prefix", "poolCidr": "10.0.0.0/16", "allocationPrefix": 24}
                }
            }"#,
        )
        .expect("Couldn't deserialize pool spec");

        assert_eq!(pool.name, "pool1");
        assert_eq!(
            pool.datacenters["aws-eu-1"],
            PoolDatacenterSettings::range("192.168.1.0/28", NonZeroU32::new(8).unwrap())
        );
        assert_eq!(
            pool.datacenters["azure-as-2"],
            PoolDatacenterSettings::prefix("10.0.0.0/16", 24)
        );
        assert_eq!(
            pool.datacenters["azure-as-2"].allocation_type(),
            AllocationType::Prefix
        );
    }

    #[test]
    fn test_zero_allocation_range_is_rejected() {
        let result: Result<PoolDatacenterSettings, _> = serde_json::from_str(
            r#"{"type": "range", "poolCidr": "192.168.1.0/28", "allocationRange": 0}"#,
        );
        result.expect_err("Unexpectedly accepted a zero-sized range allocation");
    }

    #[test]
    fn test_settings_require_field_matching_type() {
        let result: Result<PoolDatacenterSettings, _> = serde_json::from_str(
            r#"{"type": "prefix", "poolCidr": "192.168.1.0/28", "allocationRange": 4}"#,
        );
        result.expect_err("Unexpectedly accepted prefix settings without allocationPrefix");
    }

    #[test]
    fn test_allocation_record_wire_format() {
        let allocation = IpamAllocation {
            ipam_pool_name: "pool1".to_string(),
            cluster: "c1".to_string(),
            datacenter: "aws-eu-1".to_string(),
            assignment: Assignment::Range {
                addresses: vec!["192.168.1.0-192.168.1.7".to_string()],
            },
        };
        let value = serde_json::to_value(&allocation).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ipamPoolName": "pool1",
                "cluster": "c1",
                "datacenter": "aws-eu-1",
                "type": "range",
                "addresses": ["192.168.1.0-192.168.1.7"],
            })
        );

        let parsed: IpamAllocation = serde_json::from_value(serde_json::json!({
            "ipamPoolName": "pool2",
            "type": "prefix",
            "cidr": "10.0.0.0/24",
        }))
        .unwrap();
        assert_eq!(parsed.allocation_type(), AllocationType::Prefix);
        assert_eq!(parsed.assignment.to_string(), "10.0.0.0/24");
        assert!(parsed.cluster.is_empty());
    }

    #[test]
    fn test_allocation_for() {
        let mut cluster = Cluster::new("c1");
        cluster.ipam_allocations.push(IpamAllocation {
            ipam_pool_name: "pool1".to_string(),
            cluster: "c1".to_string(),
            datacenter: "dc".to_string(),
            assignment: Assignment::Prefix {
                cidr: "10.0.0.0/24".to_string(),
            },
        });
        assert!(cluster.allocation_for("pool1").is_some());
        assert!(cluster.allocation_for("pool2").is_none());
    }
}
