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

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
pub enum Cmd {
    #[clap(
        about = "Apply one or more pools to an allocation table, handing every cluster without an allocation from the pool a new one."
    )]
    Apply(ApplyPool),
    #[clap(
        about = "Check that the existing allocations of an allocation table are compatible with one or more pools, and report usage."
    )]
    Check(CheckPool),
    #[clap(about = "Show the allocations held in an allocation table")]
    Show(ShowAllocations),
}

#[derive(Parser, Debug)]
pub struct ApplyPool {
    /// Pool document (.toml, .yaml, .yml or .json) holding one pool or a list under `pools`
    #[clap(short, long)]
    pub pool: PathBuf,

    /// Allocation table document, keyed by datacenter
    #[clap(short, long)]
    pub allocations: PathBuf,

    /// Where to write the updated table. Printed to stdout as YAML if omitted.
    #[clap(short, long, conflicts_with = "dry_run")]
    pub output: Option<PathBuf>,

    /// Print the allocations that would be made without writing anything
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct CheckPool {
    #[clap(short, long)]
    pub pool: PathBuf,

    #[clap(short, long)]
    pub allocations: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ShowAllocations {
    #[clap(short, long)]
    pub allocations: PathBuf,

    /// Only show allocations from this pool
    #[clap(long)]
    pub pool: Option<String>,

    /// Only show this datacenter
    #[clap(long)]
    pub datacenter: Option<String>,
}
