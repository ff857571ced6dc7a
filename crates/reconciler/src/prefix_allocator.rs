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
use ipam_network::IpNet;
use ipam_network::ip::subnets;

use crate::usage::{UsageKey, UsageTracker};
use crate::{IpamError, IpamResult};

/// Whether `prefix_len` can be carved out of `pool_cidr`: no coarser than the
/// pool itself, and no longer than the address width.
pub fn is_valid_subnet_prefix(pool_cidr: &IpNet, prefix_len: u8) -> bool {
    (pool_cidr.prefix_len()..=pool_cidr.max_prefix_len()).contains(&prefix_len)
}

// find_free_subnet walks the /prefix_len subnets of pool_cidr in ascending
// order, starting at the pool's network address and stepping by the subnet
// size, and returns the first one not yet marked used for this datacenter and
// pool.
//
// The returned subnet is NOT marked used here. The caller marks it right
// after accepting it.
pub fn find_free_subnet(
    datacenter: &str,
    pool: &str,
    pool_cidr: &IpNet,
    prefix_len: u8,
    tracker: &UsageTracker,
) -> IpamResult<IpNet> {
    if !is_valid_subnet_prefix(pool_cidr, prefix_len) {
        return Err(IpamError::InvalidPrefix {
            pool: pool.to_string(),
            pool_cidr: *pool_cidr,
            prefix_len,
        });
    }

    subnets(pool_cidr, prefix_len)?
        .find(|candidate| !tracker.is_used(datacenter, pool, &UsageKey::Subnet(*candidate)))
        .ok_or_else(|| IpamError::Exhaustion {
            pool: pool.to_string(),
            datacenter: datacenter.to_string(),
            pool_cidr: *pool_cidr,
            prefix_len,
        })
}
