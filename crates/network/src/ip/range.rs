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
use std::fmt::Display;
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::{IpAddrRange, IpNet, Ipv4AddrRange, Ipv6AddrRange};

use super::address::{AddressError, is_successor, parse_addr};
use super::address_family::IdentifyAddressFamily;

/// An inclusive, contiguous run of addresses written as `<first>-<last>`. A
/// single address is written with itself at both ends, e.g.
/// `10.0.0.1-10.0.0.1`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct AddressRange {
    first: IpAddr,
    last: IpAddr,
}

impl AddressRange {
    /// Both ends must be in the same address family, and `first` must not
    /// come after `last`.
    pub fn new(first: IpAddr, last: IpAddr) -> Result<Self, AddressError> {
        if !first.same_family_as(&last) {
            return Err(AddressError::InvalidRange {
                input: format!("{first}-{last}"),
                reason: "range mixes IPv4 and IPv6 addresses",
            });
        }
        if first > last {
            return Err(AddressError::InvalidRange {
                input: format!("{first}-{last}"),
                reason: "first address comes after last address",
            });
        }
        Ok(Self { first, last })
    }

    pub fn single(addr: IpAddr) -> Self {
        Self {
            first: addr,
            last: addr,
        }
    }

    pub fn first(&self) -> IpAddr {
        self.first
    }

    pub fn last(&self) -> IpAddr {
        self.last
    }

    /// Extend this range by one address if `addr` directly follows its last
    /// address. Returns false (and leaves the range alone) otherwise.
    pub fn try_extend(&mut self, addr: IpAddr) -> bool {
        if is_successor(addr, self.last) {
            self.last = addr;
            true
        } else {
            false
        }
    }

    /// Whether both ends of the range fall inside `block`. Since a block is
    /// contiguous, this means every member address does.
    pub fn is_contained_in(&self, block: &IpNet) -> bool {
        block.contains(&self.first) && block.contains(&self.last)
    }

    /// Every address in the range, ascending.
    pub fn addresses(&self) -> IpAddrRange {
        match (self.first, self.last) {
            (IpAddr::V4(first), IpAddr::V4(last)) => Ipv4AddrRange::new(first, last).into(),
            (IpAddr::V6(first), IpAddr::V6(last)) => Ipv6AddrRange::new(first, last).into(),
            // new() refuses mixed families.
            _ => unreachable!(),
        }
    }

    /// Coalesce ascending addresses into the minimal list of contiguous
    /// ranges. A new range starts whenever an address is not the successor of
    /// the one before it.
    pub fn coalesce<I>(addresses: I) -> Vec<AddressRange>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        addresses
            .into_iter()
            .fold(Vec::new(), |mut ranges: Vec<AddressRange>, addr| {
                let extended = ranges
                    .last_mut()
                    .is_some_and(|current| current.try_extend(addr));
                if !extended {
                    ranges.push(AddressRange::single(addr));
                }
                ranges
            })
    }
}

impl Display for AddressRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

impl FromStr for AddressRange {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // IPv6 addresses never contain '-', so the first one is the separator.
        let (first, last) = s.split_once('-').ok_or_else(|| AddressError::InvalidRange {
            input: s.to_string(),
            reason: "expected <first>-<last>",
        })?;
        Self::new(parse_addr(first)?, parse_addr(last)?)
    }
}
