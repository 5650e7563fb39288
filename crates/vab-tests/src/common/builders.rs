// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Builders for model trees and descriptors.

use vab_core::{value_map, Value};
use vab_registry::descriptor::{Endpoint, Identifier, ShellDescriptor, SubmodelDescriptor};

/// Builds the shell tree used across the suites.
pub fn shell_tree(id_short: &str) -> Value {
    value_map! {
        "idShort" => id_short,
        "assetKind" => "instance",
    }
}

/// Builds a sub-model tree carrying one `temp` property.
pub fn temperature_submodel(id_short: &str, temp: f64) -> Value {
    value_map! {
        "idShort" => id_short,
        "temp" => value_map! {
            "value" => temp,
            "unit" => "celsius",
        },
        "history" => Value::Array(vec![]),
        "reset" => value_map! {
            "idShort" => "reset",
            "invokable" => Value::invokable(|_| Ok(Value::Bool(true))),
        },
    }
}

/// Builds a shell descriptor with one endpoint and optional tags.
pub fn shell_descriptor(id_short: &str, endpoint: &str, tags: &[&str]) -> ShellDescriptor {
    let mut descriptor =
        ShellDescriptor::new(id_short, Identifier::custom(format!("urn:test:{id_short}")))
            .with_endpoint(Endpoint::http(endpoint));
    for tag in tags {
        descriptor = descriptor.with_tag(*tag);
    }
    descriptor
}

/// Builds a sub-model descriptor.
pub fn submodel_descriptor(id_short: &str) -> SubmodelDescriptor {
    SubmodelDescriptor::new(id_short, Identifier::custom(format!("urn:test:sm:{id_short}")))
}
