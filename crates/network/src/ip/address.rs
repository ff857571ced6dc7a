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
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use ipnet::PrefixLenError;

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid IP address {input:?}: {source}")]
    InvalidAddress {
        input: String,
        source: std::net::AddrParseError,
    },

    #[error("Invalid CIDR {input:?}: {source}")]
    InvalidCidr {
        input: String,
        source: ipnet::AddrParseError,
    },

    #[error("Invalid address range {input:?}: {reason}")]
    InvalidRange { input: String, reason: &'static str },

    #[error("Prefix length error: {0}")]
    BadPrefixLength(#[from] PrefixLenError),
}

/// Parse a single IP address, v4 or v6.
pub fn parse_addr(input: &str) -> Result<IpAddr, AddressError> {
    IpAddr::from_str(input).map_err(|source| AddressError::InvalidAddress {
        input: input.to_string(),
        source,
    })
}

/// The next address after `addr`, carrying between octets. Wraps to zero
/// past the all-ones address of its family.
pub fn successor(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => IpAddr::V4(Ipv4Addr::from(u32::from(v4).wrapping_add(1))),
        IpAddr::V6(v6) => IpAddr::V6(Ipv6Addr::from(u128::from(v6).wrapping_add(1))),
    }
}

/// Like [`successor`], but None for the all-ones address instead of wrapping.
pub fn checked_successor(addr: IpAddr) -> Option<IpAddr> {
    match addr {
        IpAddr::V4(v4) => u32::from(v4)
            .checked_add(1)
            .map(|bits| IpAddr::V4(Ipv4Addr::from(bits))),
        IpAddr::V6(v6) => u128::from(v6)
            .checked_add(1)
            .map(|bits| IpAddr::V6(Ipv6Addr::from(bits))),
    }
}

/// Whether `next` immediately follows `previous` in the address space.
pub fn is_successor(next: IpAddr, previous: IpAddr) -> bool {
    checked_successor(previous) == Some(next)
}
