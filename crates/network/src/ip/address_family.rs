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

use ipnet::IpNet;

/// The address family of an address or block. Pools, ranges and subnets are
/// only ever compared within one family.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IpAddressFamily {
    Ipv4,
    Ipv6,
}

pub trait IdentifyAddressFamily {
    /// Return the address family for this value.
    fn address_family(&self) -> IpAddressFamily;

    /// Check whether this value matches the specified `address_family`.
    fn is_address_family(&self, address_family: IpAddressFamily) -> bool {
        address_family == self.address_family()
    }

    /// Check whether `other` belongs to the same family as this value.
    fn same_family_as<O: IdentifyAddressFamily>(&self, other: &O) -> bool {
        self.is_address_family(other.address_family())
    }
}

impl IdentifyAddressFamily for IpAddr {
    fn address_family(&self) -> IpAddressFamily {
        use IpAddressFamily::*;
        match self {
            IpAddr::V4(_) => Ipv4,
            IpAddr::V6(_) => Ipv6,
        }
    }
}

impl IdentifyAddressFamily for IpNet {
    fn address_family(&self) -> IpAddressFamily {
        use IpAddressFamily::*;
        match self {
            IpNet::V4(_) => Ipv4,
            IpNet::V6(_) => Ipv6,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_address_family() {
        let v4 = IpAddr::from_str("10.0.0.1").unwrap();
        let v6 = IpNet::from_str("2001:db8::/32").unwrap();
        assert_eq!(v4.address_family(), IpAddressFamily::Ipv4);
        assert!(v6.is_address_family(IpAddressFamily::Ipv6));
        assert!(!v6.is_address_family(IpAddressFamily::Ipv4));
    }

    #[test]
    fn test_same_family_as() {
        let v4_net = IpNet::from_str("10.0.0.0/8").unwrap();
        let v4_addr = IpAddr::from_str("10.1.2.3").unwrap();
        let v6_addr = IpAddr::from_str("::1").unwrap();

        assert!(v4_net.same_family_as(&v4_addr));
        assert!(!v4_net.same_family_as(&v6_addr));
    }
}
