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

use clap::Args;
use eyre::WrapErr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Directory for log files (if not specified, only console logging is used)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[arg(long, default_value = "WARN", global = true)]
    pub log_level: String,

    #[arg(long, default_value = "DEBUG", global = true)]
    pub file_log_level: String,
}

/// Sets up console logging on stderr, plus a daily rolling log file when
/// `--log-dir` is given. Stdout is kept for documents.
///
/// The returned guard flushes the file writer when dropped, so it has to be
/// held until the program exits.
pub fn init(args: &LogArgs) -> eyre::Result<Option<WorkerGuard>> {
    let console_env_filter = EnvFilter::builder()
        .parse(&args.log_level)
        .wrap_err_with(|| format!("Invalid --log-level: {}", args.log_level))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(console_env_filter);

    let Some(log_dir) = &args.log_dir else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()?;
        return Ok(None);
    };

    let file_env_filter = EnvFilter::builder()
        .parse(&args.file_log_level)
        .wrap_err_with(|| format!("Invalid --file-log-level: {}", args.file_log_level))?;

    std::fs::create_dir_all(log_dir)
        .wrap_err_with(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix("ipam-cli")
        .filename_suffix("log")
        .build(log_dir)
        .wrap_err("Failed to create file appender")?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking_writer)
        .with_filter(file_env_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(Some(guard))
}
