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
use std::str::FromStr;

use ipnet::{IpAddrRange, IpNet, IpSubnets, Ipv4AddrRange, Ipv6AddrRange};

use super::address::AddressError;

/// Parse a CIDR block. Host bits set after the prefix are accepted and
/// masked off, so `192.168.1.5/24` comes back as `192.168.1.0/24`.
pub fn parse_cidr(input: &str) -> Result<IpNet, AddressError> {
    IpNet::from_str(input)
        .map(|block| block.trunc())
        .map_err(|source| AddressError::InvalidCidr {
            input: input.to_string(),
            source,
        })
}

/// Mask `addr` down to its first `prefix_len` bits.
pub fn mask(addr: IpAddr, prefix_len: u8) -> Result<IpAddr, AddressError> {
    Ok(IpNet::new(addr, prefix_len)?.network())
}

/// The number of addresses in a subnet of `prefix_len` in an address space of
/// `bits` total bits, i.e. `2^(bits - prefix_len)`. Returns None when the
/// prefix is longer than the address width, or when the size does not fit in
/// a u128 (only a v6 /0 is that large).
pub fn subnet_size(bits: u8, prefix_len: u8) -> Option<u128> {
    bits.checked_sub(prefix_len)
        .and_then(|host_bits| 1u128.checked_shl(host_bits.into()))
}

/// Every address in `block`, from the network address through the broadcast
/// address, in ascending order. The iterator stops at the last address of the
/// block and never steps past it.
pub fn addresses(block: &IpNet) -> IpAddrRange {
    match block {
        IpNet::V4(net) => Ipv4AddrRange::new(net.network(), net.broadcast()).into(),
        IpNet::V6(net) => Ipv6AddrRange::new(net.network(), net.broadcast()).into(),
    }
}

/// The subnets of length `prefix_len` inside `block`, in ascending order,
/// starting at the masked network address and advancing by
/// [`subnet_size`] per step. Fails if `prefix_len` is shorter than the
/// block's own prefix or longer than the address width.
pub fn subnets(block: &IpNet, prefix_len: u8) -> Result<IpSubnets, AddressError> {
    Ok(block.trunc().subnets(prefix_len)?)
}
