// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Registry descriptors.
//!
//! A descriptor maps a stable identifier to the live network endpoints that
//! currently serve the element. Shell descriptors additionally carry the
//! descriptors of their sub-models and an optional tag set for
//! multi-criteria directory lookup. Descriptors are immutable after
//! registration and replaced wholesale on re-registration.
//!
//! The serialized JSON shape of these structs is the wire contract between
//! registry client and server; it round-trips losslessly.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

/// The kind of a stable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IdKind {
    /// An IRI identifier.
    Iri,
    /// A URI identifier.
    Uri,
    /// A custom, locally scoped identifier.
    #[default]
    Custom,
}

impl IdKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdKind::Iri => "iri",
            IdKind::Uri => "uri",
            IdKind::Custom => "custom",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stable identifier together with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// The identifier string.
    pub id: String,
    /// The identifier kind.
    #[serde(default)]
    pub id_kind: IdKind,
}

impl Identifier {
    /// Creates a new identifier.
    pub fn new(id: impl Into<String>, id_kind: IdKind) -> Self {
        Self { id: id.into(), id_kind }
    }

    /// Creates a custom-kind identifier.
    pub fn custom(id: impl Into<String>) -> Self {
        Self::new(id, IdKind::Custom)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

// =============================================================================
// Endpoints
// =============================================================================

/// The transport kind of an endpoint address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointKind {
    /// HTTP binding.
    Http,
    /// Raw TCP binding.
    Tcp,
    /// OPC UA binding.
    OpcUa,
}

impl EndpointKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Http => "http",
            EndpointKind::Tcp => "tcp",
            EndpointKind::OpcUa => "opc-ua",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One network endpoint currently serving an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// The endpoint address (URL or host:port, depending on kind).
    pub address: String,
    /// The transport kind.
    pub kind: EndpointKind,
}

impl Endpoint {
    /// Creates a new endpoint.
    pub fn new(address: impl Into<String>, kind: EndpointKind) -> Self {
        Self { address: address.into(), kind }
    }

    /// Creates an HTTP endpoint.
    pub fn http(address: impl Into<String>) -> Self {
        Self::new(address, EndpointKind::Http)
    }

    /// Creates a TCP endpoint.
    pub fn tcp(address: impl Into<String>) -> Self {
        Self::new(address, EndpointKind::Tcp)
    }
}

// =============================================================================
// SubmodelDescriptor
// =============================================================================

/// Descriptor of one sub-model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelDescriptor {
    /// Short name of the sub-model, unique within its shell.
    pub id_short: String,
    /// The stable identifier.
    pub identification: Identifier,
    /// Ordered endpoint list, preferred first.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl SubmodelDescriptor {
    /// Creates a new sub-model descriptor.
    pub fn new(id_short: impl Into<String>, identification: Identifier) -> Self {
        Self {
            id_short: id_short.into(),
            identification,
            endpoints: Vec::new(),
        }
    }

    /// Appends an endpoint.
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Returns the preferred endpoint, if any.
    pub fn first_endpoint(&self) -> Option<&Endpoint> {
        self.endpoints.first()
    }
}

// =============================================================================
// ShellDescriptor
// =============================================================================

/// Descriptor of one administration shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellDescriptor {
    /// Short name of the shell.
    pub id_short: String,
    /// The stable identifier; the registry key.
    pub identification: Identifier,
    /// Ordered endpoint list, preferred first.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Descriptors of the shell's sub-models.
    #[serde(default)]
    pub submodels: Vec<SubmodelDescriptor>,
    /// Free-form labels for multi-criteria directory lookup.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl ShellDescriptor {
    /// Creates a new shell descriptor.
    pub fn new(id_short: impl Into<String>, identification: Identifier) -> Self {
        Self {
            id_short: id_short.into(),
            identification,
            endpoints: Vec::new(),
            submodels: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Returns the registry key of this descriptor.
    pub fn id(&self) -> &str {
        &self.identification.id
    }

    /// Appends an endpoint.
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Attaches a sub-model descriptor.
    pub fn with_submodel(mut self, descriptor: SubmodelDescriptor) -> Self {
        self.add_submodel_descriptor(descriptor);
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Returns the preferred endpoint, if any.
    pub fn first_endpoint(&self) -> Option<&Endpoint> {
        self.endpoints.first()
    }

    /// Returns the sub-model descriptor with the given short name.
    pub fn submodel(&self, id_short: &str) -> Option<&SubmodelDescriptor> {
        self.submodels.iter().find(|d| d.id_short == id_short)
    }

    /// Attaches a sub-model descriptor, replacing one with the same short
    /// name if present.
    pub fn add_submodel_descriptor(&mut self, descriptor: SubmodelDescriptor) {
        self.submodels.retain(|d| d.id_short != descriptor.id_short);
        self.submodels.push(descriptor);
    }

    /// Detaches the sub-model descriptor with the given short name.
    ///
    /// Returns `true` if a descriptor was removed.
    pub fn remove_submodel_descriptor(&mut self, id_short: &str) -> bool {
        let before = self.submodels.len();
        self.submodels.retain(|d| d.id_short != id_short);
        self.submodels.len() != before
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ShellDescriptor {
        ShellDescriptor::new("robot", Identifier::custom("urn:example:robot"))
            .with_endpoint(Endpoint::http("http://localhost:8081/shell"))
            .with_endpoint(Endpoint::tcp("localhost:6998"))
            .with_submodel(
                SubmodelDescriptor::new("telemetry", Identifier::custom("urn:example:telemetry"))
                    .with_endpoint(Endpoint::http("http://localhost:8081/shell/submodels/telemetry")),
            )
            .with_tag("robot")
            .with_tag("line-4")
    }

    #[test]
    fn test_serde_round_trip_is_lossless() {
        let desc = descriptor();
        let json = serde_json::to_string(&desc).unwrap();
        let back: ShellDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(desc, back);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(descriptor()).unwrap();
        assert!(json.get("idShort").is_some());
        assert_eq!(json["identification"]["idKind"], "custom");
        assert_eq!(json["endpoints"][1]["kind"], "tcp");
    }

    #[test]
    fn test_endpoint_order_is_preserved() {
        let desc = descriptor();
        assert_eq!(desc.first_endpoint().unwrap().kind, EndpointKind::Http);
    }

    #[test]
    fn test_submodel_attach_detach() {
        let mut desc = descriptor();
        assert!(desc.submodel("telemetry").is_some());

        // Replacing by short name keeps a single entry.
        desc.add_submodel_descriptor(SubmodelDescriptor::new(
            "telemetry",
            Identifier::custom("urn:example:telemetry-v2"),
        ));
        assert_eq!(desc.submodels.len(), 1);
        assert_eq!(
            desc.submodel("telemetry").unwrap().identification.id,
            "urn:example:telemetry-v2"
        );

        assert!(desc.remove_submodel_descriptor("telemetry"));
        assert!(!desc.remove_submodel_descriptor("telemetry"));
    }
}
