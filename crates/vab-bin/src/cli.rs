// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

// =============================================================================
// Cli
// =============================================================================

/// The `vab` command line.
#[derive(Debug, Parser)]
#[command(name = "vab", version, about = "Virtual automation bus node")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs a bus node.
    Run(RunArgs),

    /// Validates a configuration file and its model document.
    Validate(ValidateArgs),

    /// Prints version information.
    Version,
}

/// Arguments of `vab run`.
#[derive(Debug, clap::Args)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Arguments of `vab validate`.
#[derive(Debug, clap::Args)]
pub struct ValidateArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text.
    Text,
    /// JSON lines for log aggregation.
    Json,
    /// Compact single-line text.
    Compact,
}

// =============================================================================
// Tests
// =============================================================================
