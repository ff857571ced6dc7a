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
use ipam_network::{AddressError, IpNet};

pub type IpamResult<T> = Result<T, IpamError>;

/// Every error aborts the reconciliation pass it came from. None of them are
/// retried, and the datacenter allocation table is left exactly as it was.
#[derive(thiserror::Error, Debug)]
pub enum IpamError {
    #[error("Parse error: {0}")]
    Parse(#[from] AddressError),

    #[error(
        "Invalid prefix /{prefix_len} for subnets of pool {pool} ({pool_cidr}): must be between /{} and /{}",
        .pool_cidr.prefix_len(),
        .pool_cidr.max_prefix_len()
    )]
    InvalidPrefix {
        pool: String,
        pool_cidr: IpNet,
        prefix_len: u8,
    },

    #[error(
        "Pool {pool} is not compatible with the existing allocation of cluster {cluster} in datacenter {datacenter}: {reason}"
    )]
    IncompatiblePool {
        pool: String,
        cluster: String,
        datacenter: String,
        reason: String,
    },

    #[error(
        "Not enough free IPs in pool {pool} for datacenter {datacenter}: requested {requested}, {available} available"
    )]
    Capacity {
        pool: String,
        datacenter: String,
        requested: u32,
        available: usize,
    },

    #[error(
        "Pool {pool} has no free /{prefix_len} subnet left in {pool_cidr} for datacenter {datacenter}"
    )]
    Exhaustion {
        pool: String,
        datacenter: String,
        pool_cidr: IpNet,
        prefix_len: u8,
    },

    #[error("No clusters are deployed in datacenter {datacenter}")]
    UnknownDatacenter { datacenter: String },
}
