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
use std::net::IpAddr;

use ipam_network::IpNet;
use ipam_network::ip::{AddressRange, addresses};

use crate::usage::{UsageKey, UsageTracker};
use crate::{IpamError, IpamResult};

/// find_free_ranges takes the first `count` free addresses of `pool_cidr`
/// (ascending, first fit) for the given datacenter and pool, marks them used
/// in `tracker`, and returns them as the minimal ordered list of contiguous
/// `first-last` ranges.
///
/// Only the first `count` free addresses are ever eligible. A larger
/// contiguous run further up the pool is never preferred over a fragmented
/// start, which keeps allocations reproducible and packs usage toward the
/// low end of the pool.
///
/// If the pool has fewer than `count` free addresses left, nothing is marked
/// and a Capacity error is returned.
pub fn find_free_ranges(
    datacenter: &str,
    pool: &str,
    pool_cidr: &IpNet,
    count: u32,
    tracker: &mut UsageTracker,
) -> IpamResult<Vec<String>> {
    let wanted = count as usize;

    // Stop scanning as soon as we have enough; a v6 pool can be far too big
    // to walk end to end.
    let free: Vec<IpAddr> = addresses(pool_cidr)
        .filter(|addr| !tracker.is_used(datacenter, pool, &UsageKey::Address(*addr)))
        .take(wanted)
        .collect();

    if free.len() < wanted {
        return Err(IpamError::Capacity {
            pool: pool.to_string(),
            datacenter: datacenter.to_string(),
            requested: count,
            available: free.len(),
        });
    }

    for addr in &free {
        tracker.mark_used(datacenter, pool, UsageKey::Address(*addr));
    }

    Ok(AddressRange::coalesce(free)
        .iter()
        .map(AddressRange::to_string)
        .collect())
}
