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

use clap::Parser;

mod document;
mod logging;
mod pool;

#[derive(Debug, Parser)]
#[command(
    name = "ipam-cli",
    about = "Reconcile IPAM pools with per-datacenter cluster allocations",
    version
)]
struct Cli {
    #[command(flatten)]
    log: logging::LogArgs,

    #[command(subcommand)]
    command: pool::Cmd,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Keep the guard alive
    let _guard = logging::init(&cli.log)?;

    if let Err(e) = pool::dispatch(cli.command) {
        tracing::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    // parse_global_log_flags ensures the log flags are accepted
    // after the subcommand.
    #[test]
    fn parse_global_log_flags() {
        let cli = Cli::try_parse_from([
            "ipam-cli",
            "show",
            "-a",
            "table.yaml",
            "--log-level",
            "ipam_cli=DEBUG",
            "--log-dir",
            "/tmp/ipam-logs",
        ])
        .expect("should parse global log flags");

        assert_eq!(cli.log.log_level, "ipam_cli=DEBUG");
        assert_eq!(cli.log.file_log_level, "DEBUG");
        assert_eq!(
            cli.log.log_dir.as_deref(),
            Some(std::path::Path::new("/tmp/ipam-logs"))
        );
        assert!(matches!(cli.command, pool::Cmd::Show(_)));
    }
}
