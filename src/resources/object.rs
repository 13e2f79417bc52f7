// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Schema-less custom resource documents.
//!
//! Objects are [`DynamicObject`]s: typed metadata plus an untyped JSON payload. Only the
//! identity fields and `metadata.resourceVersion` are ever read.

use crate::error::{Error, Result};
use crate::resources::paths::{parse_group_version, ResourceRef};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use serde::{Deserialize, Serialize};

/// Accessors for the metadata fields of a custom resource
pub trait ObjectExt {
    /// `apiVersion` of the object, empty when missing
    fn api_version(&self) -> &str;

    /// `kind` of the object, empty when missing
    fn kind(&self) -> &str;

    /// Opaque optimistic concurrency token
    fn resource_version_token(&self) -> Option<&str>;

    fn set_resource_version_token(&mut self, token: Option<String>);

    /// Identity derived from the object itself; the plural is guessed from `kind`
    fn resource_ref(&self) -> Result<ResourceRef>;
}

impl ObjectExt for DynamicObject {
    fn api_version(&self) -> &str {
        self.types
            .as_ref()
            .map(|t| t.api_version.as_str())
            .unwrap_or_default()
    }

    fn kind(&self) -> &str {
        self.types.as_ref().map(|t| t.kind.as_str()).unwrap_or_default()
    }

    fn resource_version_token(&self) -> Option<&str> {
        self.metadata.resource_version.as_deref()
    }

    fn set_resource_version_token(&mut self, token: Option<String>) {
        self.metadata.resource_version = token;
    }

    fn resource_ref(&self) -> Result<ResourceRef> {
        let (group, version) = parse_group_version(self.api_version())?;
        let gvk = GroupVersionKind::gvk(&group, &version, self.kind());
        let plural = ApiResource::from_gvk(&gvk).plural;

        Ok(ResourceRef::new(
            group,
            version,
            self.metadata.namespace.clone().unwrap_or_default(),
            plural,
            self.metadata.name.clone().unwrap_or_default(),
        ))
    }
}

/// Decode one custom resource document
pub fn decode_object(bytes: &[u8]) -> Result<DynamicObject> {
    serde_json::from_slice(bytes).map_err(Error::Decode)
}

/// Encode one custom resource document
pub fn encode_object(object: &DynamicObject) -> Result<Vec<u8>> {
    serde_json::to_vec(object).map_err(Error::Encode)
}

/// List of custom resources in the order the store returned them
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceList {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<DynamicObject>,
}

impl CustomResourceList {
    pub fn resource_version(&self) -> Option<&str> {
        self.metadata.resource_version.as_deref()
    }
}
