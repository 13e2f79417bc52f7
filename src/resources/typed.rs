// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRUD on decoded custom resource objects

use crate::error::Result;
use crate::resources::client::CustomResourceClient;
use crate::resources::object::{decode_object, encode_object, ObjectExt};
use crate::resources::paths::{ResourceRef, ResourceScope};
use kube::core::DynamicObject;
use tracing::{debug, info, instrument};

impl CustomResourceClient {
    /// Fetch and decode one custom resource
    #[instrument(skip(self), fields(resource = %resource))]
    pub async fn get(&self, resource: &ResourceRef) -> Result<DynamicObject> {
        let bytes = self.get_raw(resource).await?;
        decode_object(&bytes)
    }

    /// Create a custom resource, addressed by the object's own apiVersion, kind and namespace
    #[instrument(skip(self, object))]
    pub async fn create(&self, object: &DynamicObject) -> Result<()> {
        let resource = object.resource_ref()?;
        debug!("Creating custom resource {}", resource);
        let data = encode_object(object)?;
        self.create_raw(&resource.scope, data).await
    }

    /// Replace a custom resource, addressed by the object's own identity.
    ///
    /// The object's resourceVersion is sent as is; use `atomic_modify` for a
    /// read-modify-write that survives concurrent writers.
    #[instrument(skip(self, object))]
    pub async fn update(&self, object: &DynamicObject) -> Result<()> {
        let resource = object.resource_ref()?;
        debug!("Updating custom resource {}", resource);
        let data = encode_object(object)?;
        self.update_raw(&resource, data).await
    }

    #[instrument(skip(self), fields(resource = %resource))]
    pub async fn delete(&self, resource: &ResourceRef) -> Result<()> {
        self.delete_raw(resource).await
    }

    /// List and decode every custom resource in a collection
    pub async fn list(&self, scope: &ResourceScope) -> Result<Vec<DynamicObject>> {
        Ok(self.list_raw(scope).await?.items)
    }

    /// Create a custom resource unless it already exists.
    ///
    /// An existing object is left untouched and `false` is returned. When another writer
    /// creates the object between the lookup and the create, `data` is written with an
    /// update instead. Returns `true` when `data` was written.
    #[instrument(skip(self, data), fields(resource = %resource))]
    pub async fn create_if_not_found_else_update(&self, resource: &ResourceRef, data: Vec<u8>) -> Result<bool> {
        match self.get(resource).await {
            Ok(_) => {
                debug!("Custom resource {} already exists, leaving it untouched", resource);
                return Ok(false);
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        match self.create_raw(&resource.scope, data.clone()).await {
            Ok(()) => {}
            Err(e) if e.is_already_exists() => {
                info!("Custom resource {} was created concurrently, updating it instead", resource);
                self.update_raw(resource, data).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(true)
    }
}
