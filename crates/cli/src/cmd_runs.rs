// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runs command: snapshot store operations for the execution harness.

use std::process::ExitCode;

use crate::cli::RunsCommand;
use crate::config::Config;
use crate::runs::RunStore;

pub fn run(config: &Config, command: &RunsCommand) -> anyhow::Result<ExitCode> {
    let store = RunStore::new(&config.runs_dir);

    match command {
        RunsCommand::List => {
            for name in store.list()? {
                println!("{name}");
            }
        }
        RunsCommand::New => {
            let dir = store.create()?;
            println!("{}", dir.display());
        }
        RunsCommand::Prune { keep } => {
            let keep = keep.unwrap_or(config.keep_runs);
            for name in store.prune(keep)? {
                println!("removed {name}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
