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
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::net::IpAddr;

use ipam_network::IpNet;

/// What a pool has handed out. Range pools consume individual addresses.
/// Prefix pools consume whole subnets, tracked as one opaque unit rather than
/// the addresses inside them: candidates are only ever compared against
/// subnets of the same length enumerated from the same pool, so identity of
/// the subnet is enough.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum UsageKey {
    Address(IpAddr),
    Subnet(IpNet),
}

impl Display for UsageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageKey::Address(addr) => addr.fmt(f),
            UsageKey::Subnet(subnet) => subnet.fmt(f),
        }
    }
}

/// UsageTracker records the address space consumed per (datacenter, pool)
/// during a single reconciliation pass. It is rebuilt from the existing
/// allocation records at the start of every pass and thrown away at the end;
/// nothing in it outlives the call. Keys are only ever added.
#[derive(Debug, Default)]
pub struct UsageTracker {
    used: BTreeMap<String, BTreeMap<String, BTreeSet<UsageKey>>>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_used(&mut self, datacenter: &str, pool: &str, key: UsageKey) {
        self.used
            .entry(datacenter.to_string())
            .or_default()
            .entry(pool.to_string())
            .or_default()
            .insert(key);
    }

    pub fn is_used(&self, datacenter: &str, pool: &str, key: &UsageKey) -> bool {
        self.pool_keys(datacenter, pool)
            .is_some_and(|keys| keys.contains(key))
    }

    /// Number of keys marked for this (datacenter, pool).
    pub fn used_count(&self, datacenter: &str, pool: &str) -> usize {
        self.pool_keys(datacenter, pool).map_or(0, BTreeSet::len)
    }

    fn pool_keys(&self, datacenter: &str, pool: &str) -> Option<&BTreeSet<UsageKey>> {
        self.used.get(datacenter).and_then(|pools| pools.get(pool))
    }
}
