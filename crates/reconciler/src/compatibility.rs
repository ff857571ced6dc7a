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
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::str::FromStr;

use ipam_network::IpNet;
use ipam_network::ip::{AddressRange, parse_cidr};

use crate::model::{Assignment, IpamAllocation, PoolDatacenterSettings};
use crate::prefix_allocator::is_valid_subnet_prefix;
use crate::usage::UsageKey;
use crate::{IpamError, IpamResult};

/// check_allocation verifies that an existing allocation still fits the
/// settings a pool is being (re)applied with, and returns the usage keys it
/// occupies so they can be replayed into the usage tracker.
///
/// A range allocation must hold exactly `allocation_range` distinct
/// addresses, all inside the pool CIDR. A prefix allocation must be exactly
/// `/allocation_prefix`, that length must be carvable out of the pool CIDR,
/// and its network address must sit inside the pool CIDR. An allocation of a
/// different type than the pool's is never compatible.
///
/// Malformed range or CIDR strings are reported as parse errors rather than
/// incompatibilities.
pub fn check_allocation(
    datacenter: &str,
    cluster: &str,
    allocation: &IpamAllocation,
    settings: &PoolDatacenterSettings,
    pool_cidr: &IpNet,
) -> IpamResult<Vec<UsageKey>> {
    let incompatible = |reason: String| IpamError::IncompatiblePool {
        pool: allocation.ipam_pool_name.clone(),
        cluster: cluster.to_string(),
        datacenter: datacenter.to_string(),
        reason,
    };

    match (&allocation.assignment, settings) {
        (
            Assignment::Range { addresses },
            PoolDatacenterSettings::Range {
                allocation_range, ..
            },
        ) => {
            let ranges = addresses
                .iter()
                .map(|range| AddressRange::from_str(range))
                .collect::<Result<Vec<_>, _>>()?;

            let expected = allocation_range.get() as usize;
            let members = expand_ranges(&ranges, expected).ok_or_else(|| {
                incompatible(format!(
                    "allocation holds more than the {expected} addresses the pool allocates"
                ))
            })?;
            if members.len() != expected {
                return Err(incompatible(format!(
                    "allocation holds {} addresses, the pool allocates {expected}",
                    members.len()
                )));
            }

            if let Some(outside) = ranges.iter().find(|r| !r.is_contained_in(pool_cidr)) {
                return Err(incompatible(format!(
                    "range {outside} is not inside pool CIDR {pool_cidr}"
                )));
            }

            Ok(members.into_iter().map(UsageKey::Address).collect())
        }
        (
            Assignment::Prefix { cidr },
            PoolDatacenterSettings::Prefix {
                allocation_prefix, ..
            },
        ) => {
            let subnet = parse_cidr(cidr)?;
            if subnet.prefix_len() != *allocation_prefix {
                return Err(incompatible(format!(
                    "subnet {subnet} is not a /{allocation_prefix}"
                )));
            }
            if !is_valid_subnet_prefix(pool_cidr, subnet.prefix_len()) {
                return Err(incompatible(format!(
                    "a /{} cannot be carved out of pool CIDR {pool_cidr}",
                    subnet.prefix_len()
                )));
            }
            if !pool_cidr.contains(&subnet.network()) {
                return Err(incompatible(format!(
                    "subnet {subnet} is not inside pool CIDR {pool_cidr}"
                )));
            }

            Ok(vec![UsageKey::Subnet(subnet)])
        }
        (assignment, settings) => Err(incompatible(format!(
            "allocation is of type {}, the pool allocates by {}",
            assignment.allocation_type(),
            settings.allocation_type()
        ))),
    }
}

// expand_ranges collects the distinct addresses covered by `ranges`. Ranges
// may overlap in hand-edited records, so members are deduplicated. Returns
// None as soon as more than `limit` distinct addresses are seen, which keeps
// the expansion bounded no matter how wide a stored range is.
fn expand_ranges(ranges: &[AddressRange], limit: usize) -> Option<BTreeSet<IpAddr>> {
    let mut members = BTreeSet::new();
    for range in ranges {
        for addr in range.addresses() {
            members.insert(addr);
            if members.len() > limit {
                return None;
            }
        }
    }
    Some(members)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    fn range_allocation(addresses: &[&str]) -> IpamAllocation {
        IpamAllocation {
            ipam_pool_name: "pool1".to_string(),
            cluster: "c1".to_string(),
            datacenter: "dc1".to_string(),
            assignment: Assignment::Range {
                addresses: addresses.iter().map(|a| a.to_string()).collect(),
            },
        }
    }

    fn prefix_allocation(cidr: &str) -> IpamAllocation {
        IpamAllocation {
            ipam_pool_name: "pool1".to_string(),
            cluster: "c1".to_string(),
            datacenter: "dc1".to_string(),
            assignment: Assignment::Prefix {
                cidr: cidr.to_string(),
            },
        }
    }

    fn check(allocation: &IpamAllocation, settings: &PoolDatacenterSettings) -> IpamResult<Vec<UsageKey>> {
        let pool_cidr = parse_cidr(settings.pool_cidr()).unwrap();
        check_allocation("dc1", "c1", allocation, settings, &pool_cidr)
    }

    fn range_settings(pool_cidr: &str, allocation_range: u32) -> PoolDatacenterSettings {
        PoolDatacenterSettings::range(pool_cidr, NonZeroU32::new(allocation_range).unwrap())
    }

    #[test]
    fn test_compatible_range_allocation() {
        let allocation = range_allocation(&["192.168.1.0-192.168.1.3", "192.168.1.6-192.168.1.9"]);
        let keys = check(&allocation, &range_settings("192.168.1.0/27", 8)).unwrap();
        assert_eq!(keys.len(), 8);
        assert!(keys.contains(&UsageKey::Address("192.168.1.9".parse().unwrap())));
        assert!(!keys.contains(&UsageKey::Address("192.168.1.4".parse().unwrap())));
    }

    #[test]
    fn test_range_allocation_outside_new_pool() {
        let allocation = range_allocation(&["192.168.1.0-192.168.1.7"]);
        let err = check(&allocation, &range_settings("192.168.1.0/30", 8))
            .expect_err("Unexpectedly accepted a range outside the pool");
        assert!(matches!(err, IpamError::IncompatiblePool { .. }));
    }

    #[test]
    fn test_range_allocation_with_different_count() {
        let allocation = range_allocation(&["192.168.1.0-192.168.1.7"]);
        let fewer = check(&allocation, &range_settings("192.168.1.0/27", 4));
        assert!(matches!(fewer, Err(IpamError::IncompatiblePool { .. })));

        let more = check(&allocation, &range_settings("192.168.1.0/27", 16));
        assert!(matches!(more, Err(IpamError::IncompatiblePool { .. })));
    }

    #[test]
    fn test_overlapping_ranges_count_distinct_addresses() {
        let allocation = range_allocation(&["10.0.0.0-10.0.0.3", "10.0.0.2-10.0.0.5"]);
        let keys = check(&allocation, &range_settings("10.0.0.0/24", 6)).unwrap();
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn test_huge_range_is_not_expanded() {
        let allocation = range_allocation(&["2001:db8::-2001:db8::ffff:ffff:ffff:ffff"]);
        let result = check(&allocation, &range_settings("2001:db8::/32", 8));
        assert!(matches!(result, Err(IpamError::IncompatiblePool { .. })));
    }

    #[test]
    fn test_malformed_range_is_a_parse_error() {
        let allocation = range_allocation(&["192.168.1.0_192.168.1.7"]);
        let result = check(&allocation, &range_settings("192.168.1.0/24", 8));
        assert!(matches!(result, Err(IpamError::Parse(_))));
    }

    #[test]
    fn test_compatible_prefix_allocation() {
        let allocation = prefix_allocation("192.168.0.0/28");
        let keys = check(&allocation, &PoolDatacenterSettings::prefix("192.168.0.0/28", 28)).unwrap();
        assert_eq!(keys, vec![UsageKey::Subnet("192.168.0.0/28".parse().unwrap())]);
    }

    #[test]
    fn test_prefix_allocation_coarser_than_new_pool() {
        let allocation = prefix_allocation("192.168.0.0/28");
        let result = check(&allocation, &PoolDatacenterSettings::prefix("192.168.0.0/29", 28));
        assert!(matches!(result, Err(IpamError::IncompatiblePool { .. })));
    }

    #[test]
    fn test_prefix_allocation_with_different_length() {
        let allocation = prefix_allocation("192.168.0.0/28");
        let result = check(&allocation, &PoolDatacenterSettings::prefix("192.168.0.0/16", 29));
        assert!(matches!(result, Err(IpamError::IncompatiblePool { .. })));
    }

    #[test]
    fn test_prefix_allocation_outside_new_pool() {
        let allocation = prefix_allocation("10.0.0.0/28");
        let result = check(&allocation, &PoolDatacenterSettings::prefix("192.168.0.0/16", 28));
        assert!(matches!(result, Err(IpamError::IncompatiblePool { .. })));
    }

    #[test]
    fn test_type_mismatch_is_incompatible() {
        let allocation = prefix_allocation("192.168.0.0/28");
        let result = check(&allocation, &range_settings("192.168.0.0/16", 16));
        assert!(matches!(result, Err(IpamError::IncompatiblePool { .. })));

        let allocation = range_allocation(&["192.168.0.0-192.168.0.15"]);
        let result = check(&allocation, &PoolDatacenterSettings::prefix("192.168.0.0/16", 28));
        assert!(matches!(result, Err(IpamError::IncompatiblePool { .. })));
    }
}
