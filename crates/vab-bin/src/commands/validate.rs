// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `vab validate` command.

use vab_config::ConfigLoader;

use crate::cli::ValidateArgs;
use crate::error::BinResult;
use crate::model::ModelDocument;

/// Validates the configuration and, when configured, the model document.
pub async fn execute(args: &ValidateArgs) -> BinResult<()> {
    let config = ConfigLoader::new().load(&args.config)?;

    println!("configuration ok: {}", args.config.display());
    println!("  node      {}", config.node.id_short);
    println!("  http      {}", config.http.addr());
    if config.tcp.enabled {
        println!("  tcp       {}", config.tcp.addr());
    }
    println!("  registry  serve={}", config.registry.serve);

    if let Some(path) = &config.node.model_path {
        let document = ModelDocument::load(path)?;
        // Building the provider exercises every tree in the document.
        document.build_provider(&config.node.id_short)?;
        println!(
            "model ok: {} ({} submodels)",
            path.display(),
            document.submodels.len()
        );
    }
    Ok(())
}
