// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Entry point of the `vab` binary.

use clap::Parser;
use tracing::error;

use vab_bin::cli::{Cli, Command};
use vab_bin::{commands, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    let result = match &cli.command {
        Command::Run(args) => commands::run::execute(args).await,
        Command::Validate(args) => commands::validate::execute(args).await,
        Command::Version => {
            commands::version::execute();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}
