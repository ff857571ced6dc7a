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

use std::path::Path;

use eyre::WrapErr;
use ipam::{DatacenterAllocations, IpamPool, PoolUsage, ReconcilePlan};
use prettytable::{Table, row};

use super::args::{ApplyPool, CheckPool, ShowAllocations};
use crate::document::{self, DocumentFormat, PoolDocument};

fn load_pools(path: &Path) -> eyre::Result<Vec<IpamPool>> {
    let pools = document::load::<PoolDocument>(path)?.into_pools();
    tracing::debug!(path = %path.display(), count = pools.len(), "Loaded pool document");
    Ok(pools)
}

fn load_table(path: &Path) -> eyre::Result<DatacenterAllocations> {
    let table: DatacenterAllocations = document::load(path)?;
    tracing::debug!(
        path = %path.display(),
        datacenters = table.len(),
        "Loaded allocation table"
    );
    Ok(table)
}

/// Applies every pool in turn to the same in-memory table. Each pool is its
/// own atomic pass, and the table is only written once all of them succeed.
pub fn apply(args: &ApplyPool) -> color_eyre::Result<()> {
    let pools = load_pools(&args.pool)?;
    let mut table = load_table(&args.allocations)?;

    let mut plans = Vec::with_capacity(pools.len());
    for pool in &pools {
        let plan = ipam::apply(&mut table, pool)
            .wrap_err_with(|| format!("Failed to apply pool {}", pool.name))?;
        log_plan(&plan);
        plans.push(plan);
    }

    if args.dry_run {
        pending_table(&plans).printstd();
        for plan in &plans {
            usage_table(plan.pool(), plan.usage()).printstd();
        }
        return Ok(());
    }

    match &args.output {
        Some(output) => {
            document::save(&table, output)?;
            tracing::info!(path = %output.display(), "Wrote allocation table");
        }
        None => print!("{}", document::render(&table, DocumentFormat::Yaml)?),
    }
    Ok(())
}

pub fn check(args: &CheckPool) -> color_eyre::Result<()> {
    let pools = load_pools(&args.pool)?;
    let table = load_table(&args.allocations)?;

    for pool in &pools {
        let usage = ipam::check(&table, pool)
            .wrap_err_with(|| format!("Pool {} does not match the allocation table", pool.name))?;
        tracing::info!(pool = %pool.name, "Existing allocations are compatible");
        usage_table(&pool.name, &usage).printstd();
    }
    Ok(())
}

pub fn show(args: &ShowAllocations) -> color_eyre::Result<()> {
    let table = load_table(&args.allocations)?;
    let rendered = allocations_table(&table, args.pool.as_deref(), args.datacenter.as_deref());
    if rendered.is_empty() {
        println!("No allocations found");
        return Ok(());
    }
    rendered.printstd();
    Ok(())
}

fn log_plan(plan: &ReconcilePlan) {
    if plan.is_empty() {
        tracing::info!(pool = plan.pool(), "Every cluster already holds an allocation");
        return;
    }
    for allocation in plan.allocations() {
        tracing::info!(
            pool = plan.pool(),
            datacenter = %allocation.datacenter,
            cluster = %allocation.cluster,
            assignment = %allocation.assignment,
            "New allocation"
        );
    }
}

pub(crate) fn pending_table(plans: &[ReconcilePlan]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Pool", "Datacenter", "Cluster", "Type", "Assignment"]);
    for plan in plans {
        for allocation in plan.allocations() {
            table.add_row(row![
                plan.pool(),
                allocation.datacenter,
                allocation.cluster,
                allocation.allocation_type(),
                allocation.assignment,
            ]);
        }
    }
    table
}

pub(crate) fn usage_table(pool: &str, usage: &[PoolUsage]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Pool", "Datacenter", "Type", "Pool CIDR", "Used", "Capacity"]);
    for entry in usage {
        let (used, capacity) = match entry.capacity {
            Some(capacity) if capacity > 0 => (
                format!(
                    "{} ({:.0}%)",
                    entry.used,
                    entry.used as f64 / capacity as f64 * 100.0
                ),
                capacity.to_string(),
            ),
            Some(capacity) => (entry.used.to_string(), capacity.to_string()),
            None => (entry.used.to_string(), "-".to_string()),
        };
        table.add_row(row![
            pool,
            entry.datacenter,
            entry.allocation_type,
            entry.pool_cidr,
            used,
            capacity,
        ]);
    }
    table
}

pub(crate) fn allocations_table(
    allocations: &DatacenterAllocations,
    pool: Option<&str>,
    datacenter: Option<&str>,
) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Datacenter", "Cluster", "Pool", "Type", "Assignment"]);
    for (dc, clusters) in allocations {
        if datacenter.is_some_and(|wanted| wanted != dc) {
            continue;
        }
        for cluster in clusters {
            for allocation in &cluster.ipam_allocations {
                if pool.is_some_and(|wanted| wanted != allocation.ipam_pool_name) {
                    continue;
                }
                table.add_row(row![
                    dc,
                    cluster.name,
                    allocation.ipam_pool_name,
                    allocation.allocation_type(),
                    allocation.assignment,
                ]);
            }
        }
    }
    table
}
