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
use ipam_network::ip::{parse_cidr, subnet_size};

use crate::compatibility::check_allocation;
use crate::model::{
    AllocationType, Assignment, Cluster, DatacenterAllocations, IpamAllocation, IpamPool,
    PoolDatacenterSettings,
};
use crate::prefix_allocator::find_free_subnet;
use crate::range_allocator::find_free_ranges;
use crate::usage::{UsageKey, UsageTracker};
use crate::{IpamError, IpamResult};

/// How much of a pool's space is in use in one datacenter, counted after a
/// pass. Range pools count addresses, prefix pools count subnets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolUsage {
    pub datacenter: String,
    pub allocation_type: AllocationType,
    pub pool_cidr: IpNet,
    pub used: usize,
    /// None when the capacity doesn't fit in a u128, or when the configured
    /// prefix can't be carved out of the pool at all.
    pub capacity: Option<u128>,
}

/// The outcome of a reconciliation pass: the allocations it hands out and the
/// usage it leaves behind. Produced by [`plan`] without touching the table, or
/// by [`apply`] after committing.
#[derive(Debug)]
pub struct ReconcilePlan {
    pool: String,
    pending: Vec<PendingAllocation>,
    usage: Vec<PoolUsage>,
}

#[derive(Debug)]
struct PendingAllocation {
    datacenter: String,
    cluster_index: usize,
    allocation: IpamAllocation,
}

impl ReconcilePlan {
    pub fn pool(&self) -> &str {
        &self.pool
    }

    /// New allocations, grouped by datacenter in ascending order and in
    /// cluster list order within each datacenter.
    pub fn allocations(&self) -> impl Iterator<Item = &IpamAllocation> {
        self.pending.iter().map(|pending| &pending.allocation)
    }

    /// True when every cluster already holds an allocation from the pool.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn usage(&self) -> &[PoolUsage] {
        &self.usage
    }

    // The plan was built against this exact table, so every pending
    // allocation points at a cluster that exists.
    fn commit(&self, table: &mut DatacenterAllocations) {
        for pending in &self.pending {
            if let Some(cluster) = table
                .get_mut(&pending.datacenter)
                .and_then(|clusters| clusters.get_mut(pending.cluster_index))
            {
                cluster.ipam_allocations.push(pending.allocation.clone());
            }
        }
    }
}

/// One datacenter of the pool, resolved against the table.
struct DatacenterPass<'a> {
    datacenter: &'a str,
    settings: &'a PoolDatacenterSettings,
    pool_cidr: IpNet,
    clusters: &'a [Cluster],
}

/// apply reconciles `table` with `pool`: every cluster in a datacenter the
/// pool configures, that doesn't already hold an allocation from the pool,
/// gets one. Existing allocations from the pool are checked against the
/// pool's current settings first and are never moved.
///
/// The table is only modified if the whole pass succeeds. On any error it is
/// left exactly as it was. Applying the same pool twice is a no-op the second
/// time.
pub fn apply(table: &mut DatacenterAllocations, pool: &IpamPool) -> IpamResult<ReconcilePlan> {
    let plan = plan(table, pool)?;
    plan.commit(table);
    Ok(plan)
}

/// plan runs a full reconciliation pass without committing it, returning the
/// allocations [`apply`] would make.
pub fn plan(table: &DatacenterAllocations, pool: &IpamPool) -> IpamResult<ReconcilePlan> {
    let passes = resolve_datacenters(table, pool)?;

    let mut tracker = UsageTracker::new();
    replay(&passes, pool, &mut tracker)?;
    let pending = generate(&passes, pool, &mut tracker)?;

    Ok(ReconcilePlan {
        pool: pool.name.clone(),
        pending,
        usage: summarize(&passes, pool, &tracker),
    })
}

/// check verifies that every existing allocation from `pool` is compatible
/// with the pool's current settings, without handing out anything new.
pub fn check(table: &DatacenterAllocations, pool: &IpamPool) -> IpamResult<Vec<PoolUsage>> {
    let passes = resolve_datacenters(table, pool)?;

    let mut tracker = UsageTracker::new();
    replay(&passes, pool, &mut tracker)?;

    Ok(summarize(&passes, pool, &tracker))
}

fn resolve_datacenters<'a>(
    table: &'a DatacenterAllocations,
    pool: &'a IpamPool,
) -> IpamResult<Vec<DatacenterPass<'a>>> {
    pool.datacenters
        .iter()
        .map(|(datacenter, settings)| -> IpamResult<DatacenterPass<'a>> {
            let clusters = table
                .get(datacenter)
                .ok_or_else(|| IpamError::UnknownDatacenter {
                    datacenter: datacenter.clone(),
                })?;
            Ok(DatacenterPass {
                datacenter,
                settings,
                pool_cidr: parse_cidr(settings.pool_cidr())?,
                clusters,
            })
        })
        .collect()
}

// replay marks everything already allocated from this pool as used, failing
// on the first allocation the pool's settings no longer accept. Allocations
// from other pools, and from datacenters the pool doesn't configure, are not
// looked at.
fn replay(passes: &[DatacenterPass], pool: &IpamPool, tracker: &mut UsageTracker) -> IpamResult<()> {
    for pass in passes {
        for cluster in pass.clusters {
            for allocation in cluster
                .ipam_allocations
                .iter()
                .filter(|allocation| allocation.ipam_pool_name == pool.name)
            {
                let keys = check_allocation(
                    pass.datacenter,
                    &cluster.name,
                    allocation,
                    pass.settings,
                    &pass.pool_cidr,
                )?;
                for key in keys {
                    tracker.mark_used(pass.datacenter, &pool.name, key);
                }
            }
        }
    }
    Ok(())
}

// generate walks the clusters of each datacenter in list order and allocates
// for the ones the pool doesn't serve yet. The same tracker is threaded
// through, so no two clusters in a datacenter get overlapping space.
fn generate(
    passes: &[DatacenterPass],
    pool: &IpamPool,
    tracker: &mut UsageTracker,
) -> IpamResult<Vec<PendingAllocation>> {
    let mut pending = Vec::new();

    for pass in passes {
        for (cluster_index, cluster) in pass.clusters.iter().enumerate() {
            if cluster.allocation_for(&pool.name).is_some() {
                continue;
            }

            let assignment = match pass.settings {
                PoolDatacenterSettings::Range {
                    allocation_range, ..
                } => Assignment::Range {
                    addresses: find_free_ranges(
                        pass.datacenter,
                        &pool.name,
                        &pass.pool_cidr,
                        allocation_range.get(),
                        tracker,
                    )?,
                },
                PoolDatacenterSettings::Prefix {
                    allocation_prefix, ..
                } => {
                    let subnet = find_free_subnet(
                        pass.datacenter,
                        &pool.name,
                        &pass.pool_cidr,
                        *allocation_prefix,
                        tracker,
                    )?;
                    tracker.mark_used(pass.datacenter, &pool.name, UsageKey::Subnet(subnet));
                    Assignment::Prefix {
                        cidr: subnet.to_string(),
                    }
                }
            };

            pending.push(PendingAllocation {
                datacenter: pass.datacenter.to_string(),
                cluster_index,
                allocation: IpamAllocation {
                    ipam_pool_name: pool.name.clone(),
                    cluster: cluster.name.clone(),
                    datacenter: pass.datacenter.to_string(),
                    assignment,
                },
            });
        }
    }

    Ok(pending)
}

fn summarize(passes: &[DatacenterPass], pool: &IpamPool, tracker: &UsageTracker) -> Vec<PoolUsage> {
    passes
        .iter()
        .map(|pass| {
            let pool_prefix = pass.pool_cidr.prefix_len();
            let capacity = match pass.settings {
                PoolDatacenterSettings::Range { .. } => {
                    subnet_size(pass.pool_cidr.max_prefix_len(), pool_prefix)
                }
                // The number of /allocation_prefix subnets in the pool is
                // 2^(allocation_prefix - pool_prefix).
                PoolDatacenterSettings::Prefix {
                    allocation_prefix, ..
                } if *allocation_prefix <= pass.pool_cidr.max_prefix_len() => {
                    subnet_size(*allocation_prefix, pool_prefix)
                }
                PoolDatacenterSettings::Prefix { .. } => None,
            };

            PoolUsage {
                datacenter: pass.datacenter.to_string(),
                allocation_type: pass.settings.allocation_type(),
                pool_cidr: pass.pool_cidr,
                used: tracker.used_count(pass.datacenter, &pool.name),
                capacity,
            }
        })
        .collect()
}
