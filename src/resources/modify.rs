// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-modify-write of a custom resource under optimistic concurrency.
//!
//! Each attempt fetches the latest object, applies the caller's modifier and writes the
//! result back with the resourceVersion it was read at. A write rejected as a conflict
//! starts a new attempt from a fresh read; every other failure ends the loop. The modifier
//! can therefore run more than once, each time against a different base object.

use crate::error::{BoxError, Error, Result};
use crate::resources::client::CustomResourceClient;
use crate::resources::object::{decode_object, encode_object};
use crate::resources::paths::ResourceRef;
use kube::core::DynamicObject;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, instrument, warn};

impl CustomResourceClient {
    /// Get the custom resource, modify it in place and write it back, retrying on conflicts.
    ///
    /// Retries are unbounded unless `Config::modify_timeout` is set. Dropping the returned
    /// future cancels the operation between round trips.
    ///
    /// The deadline can fire while a write is in flight. An `Error::Timeout` therefore does not
    /// mean the object is unchanged: the last write may have been applied by the store.
    #[instrument(skip(self, modifier), fields(resource = %resource))]
    pub async fn atomic_modify<F, E>(&self, resource: &ResourceRef, modifier: F) -> Result<()>
    where
        F: FnMut(&mut DynamicObject) -> std::result::Result<(), E>,
        E: Into<BoxError>,
    {
        debug!("Atomically modifying custom resource {}", resource);
        let attempts = AtomicU32::new(0);
        let retry = self.modify_until_written(resource, modifier, &attempts);

        let Some(limit) = self.config.modify_timeout else {
            return retry.await;
        };

        match timeout(limit, retry).await {
            Ok(result) => result,
            Err(_) => {
                let attempts = attempts.load(Ordering::SeqCst);
                error!(
                    "Giving up on custom resource {} after {} attempts within {:?}",
                    resource, attempts, limit
                );
                Err(Error::Timeout {
                    resource: resource.to_string(),
                    attempts,
                    timeout: limit,
                })
            }
        }
    }

    /// Same as [`atomic_modify`](Self::atomic_modify), passing `context` to every modifier call
    pub async fn atomic_modify_with<C, F, E>(&self, resource: &ResourceRef, mut modifier: F, context: &C) -> Result<()>
    where
        C: ?Sized,
        F: FnMut(&mut DynamicObject, &C) -> std::result::Result<(), E>,
        E: Into<BoxError>,
    {
        self.atomic_modify(resource, |object| modifier(object, context))
            .await
    }

    async fn modify_until_written<F, E>(&self, resource: &ResourceRef, mut modifier: F, attempts: &AtomicU32) -> Result<()>
    where
        F: FnMut(&mut DynamicObject) -> std::result::Result<(), E>,
        E: Into<BoxError>,
    {
        let plural = &resource.scope.plural;

        loop {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;

            let bytes = match self.get_raw(resource).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!("Failed to get custom resource {:?}, kind: {:?}: {}", resource.name, plural, e);
                    return Err(e);
                }
            };

            let mut object = match decode_object(&bytes) {
                Ok(object) => object,
                Err(e) => {
                    error!("Failed to decode custom resource {:?}, kind: {:?}: {}", resource.name, plural, e);
                    return Err(e);
                }
            };

            if let Err(e) = modifier(&mut object) {
                let e = e.into();
                error!("Failed to modify custom resource {:?}, kind: {:?}: {}", resource.name, plural, e);
                return Err(Error::Modify(e));
            }

            let data = match encode_object(&object) {
                Ok(data) => data,
                Err(e) => {
                    error!("Failed to encode custom resource {:?}, kind: {:?}: {}", resource.name, plural, e);
                    return Err(e);
                }
            };

            // Written back to the path it was read from, not one derived from the object's kind.
            match self.update_raw(resource, data).await {
                Ok(()) => {
                    debug!("Modified custom resource {} on attempt {}", resource, attempt);
                    return Ok(());
                }
                Err(e) if e.is_conflict() => {
                    warn!(
                        "Failed to update custom resource {:?}, kind: {:?}: {}, will retry in {:?}",
                        resource.name, plural, e, self.config.retry_interval
                    );
                    sleep(self.config.retry_interval).await;
                }
                Err(e) => {
                    error!("Failed to update custom resource {:?}, kind: {:?}: {}", resource.name, plural, e);
                    return Err(e);
                }
            }
        }
    }
}
