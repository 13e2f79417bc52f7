// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::error::Result;
use crate::resources::client::CustomResourceClient;
use crate::resources::object::{decode_object, encode_object, ObjectExt};
use crate::resources::paths::ResourceRef;
use tracing::{debug, instrument};

impl CustomResourceClient {
    /// Create the custom resource if it doesn't exist, otherwise overwrite it with `data`.
    ///
    /// On overwrite the resourceVersion of the stored object replaces whatever `data` carries,
    /// since the store rejects writes with a missing or stale token.
    #[instrument(skip(self, data), fields(resource = %resource))]
    pub async fn create_or_update(&self, resource: &ResourceRef, data: Vec<u8>) -> Result<()> {
        let existing = match self.get_raw(resource).await {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => {
                debug!("Custom resource {} not found, creating it", resource);
                return self.create_raw(&resource.scope, data).await;
            }
            Err(e) => return Err(e),
        };

        let existing = decode_object(&existing)?;
        let mut desired = decode_object(&data)?;
        desired.set_resource_version_token(existing.resource_version_token().map(str::to_string));

        self.update_raw(resource, encode_object(&desired)?).await
    }
}
