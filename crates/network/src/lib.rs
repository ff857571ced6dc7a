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

//! Address-space arithmetic used by the IPAM reconciler: CIDR parsing and
//! masking, address successors, subnet enumeration and `first-last` address
//! ranges. Everything here is a pure function over fixed-width addresses.

pub mod ip {
    pub mod address;
    pub mod address_family;
    pub mod prefix;
    pub mod range;

    pub use address::{checked_successor, is_successor, parse_addr, successor};
    pub use address_family::{IdentifyAddressFamily, IpAddressFamily};
    pub use prefix::{addresses, mask, parse_cidr, subnet_size, subnets};
    pub use range::AddressRange;
}

pub use ip::address::AddressError;
// Part of our public API, since every pool and allocation is expressed in it.
pub use ipnet::IpNet;
