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

pub mod args;
pub mod cmds;

pub use args::Cmd;

pub fn dispatch(cmd: Cmd) -> color_eyre::Result<()> {
    match cmd {
        Cmd::Apply(args) => cmds::apply(&args),
        Cmd::Check(args) => cmds::check(&args),
        Cmd::Show(args) => cmds::show(&args),
    }
}
