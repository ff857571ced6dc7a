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

//! The IPAM reconciliation engine.
//!
//! Given a table of clusters per datacenter and a named [`IpamPool`], [`apply`]
//! hands every cluster that does not yet hold an allocation from that pool a
//! slice of the pool's address space: either a fixed number of addresses
//! (written as contiguous `first-last` ranges) or one subnet of a fixed prefix
//! length. Existing allocations are replayed and checked for compatibility
//! first, and nothing is written to the table unless the whole pass succeeds.
//!
//! The engine does no I/O and no logging; loading documents, persisting the
//! table and reporting errors are left to the caller.

pub mod compatibility;
pub mod error;
pub mod model;
pub mod prefix_allocator;
pub mod range_allocator;
pub mod reconcile;
pub mod usage;

pub use error::{IpamError, IpamResult};
pub use model::{
    AllocationType, Assignment, Cluster, DatacenterAllocations, IpamAllocation, IpamPool,
    PoolDatacenterSettings,
};
pub use reconcile::{PoolUsage, ReconcilePlan, apply, check, plan};
pub use usage::{UsageKey, UsageTracker};
