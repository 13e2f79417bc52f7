// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Raw CRUD requests against custom resource paths

use crate::constants::status;
use crate::error::{Error, Result};
use crate::resources::client::CustomResourceClient;
use crate::resources::object::CustomResourceList;
use crate::resources::paths::{ResourceRef, ResourceScope};
use bytes::Bytes;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use kube::client::Body;
use tracing::{debug, instrument};

impl CustomResourceClient {
    /// Send one request and return the status and body without judging the status
    async fn send_raw(&self, method: Method, uri: &str, body: Option<Vec<u8>>) -> Result<(StatusCode, Bytes)> {
        debug!("[{}]: {}", method, uri);

        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(data) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(data)),
            None => builder.body(Body::from(Vec::new())),
        }
        .map_err(kube::Error::HttpError)?;

        let response = self.client.send(request).await?;
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| kube::Error::Service(e.into()))?
            .to_bytes();

        Ok((status, bytes))
    }

    /// Send one request, turning every failure status into a classified store error
    async fn send_checked(&self, method: Method, uri: &str, body: Option<Vec<u8>>) -> Result<(u16, Bytes)> {
        let (status, bytes) = self.send_raw(method, uri, body).await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::from_response(status.as_u16(), &bytes));
        }
        Ok((status.as_u16(), bytes))
    }

    /// Fetch the raw document of one custom resource
    #[instrument(skip(self), fields(resource = %resource))]
    pub async fn get_raw(&self, resource: &ResourceRef) -> Result<Vec<u8>> {
        let uri = resource.resource_path();
        let (_, bytes) = self.send_checked(Method::GET, &uri, None).await?;
        Ok(bytes.to_vec())
    }

    /// Create a custom resource in its collection; only `201 Created` counts as success
    #[instrument(skip(self, data), fields(collection = %scope.collection_path()))]
    pub async fn create_raw(&self, scope: &ResourceScope, data: Vec<u8>) -> Result<()> {
        let uri = scope.collection_path();
        let (code, _) = self.send_checked(Method::POST, &uri, Some(data)).await?;
        debug!("Written {}, status: {}", uri, code);

        if code != status::CREATED {
            return Err(Error::UnexpectedStatus {
                verb: Method::POST.to_string(),
                uri,
                code,
                expected: status::CREATED,
            });
        }
        Ok(())
    }

    /// Replace a custom resource; only `200 OK` counts as success
    #[instrument(skip(self, data), fields(resource = %resource))]
    pub async fn update_raw(&self, resource: &ResourceRef, data: Vec<u8>) -> Result<()> {
        let uri = resource.resource_path();
        let (code, _) = self.send_checked(Method::PUT, &uri, Some(data)).await?;
        debug!("Updated {}, status: {}", uri, code);

        if code != status::UPDATED {
            return Err(Error::UnexpectedStatus {
                verb: Method::PUT.to_string(),
                uri,
                code,
                expected: status::UPDATED,
            });
        }
        Ok(())
    }

    /// Delete a custom resource
    #[instrument(skip(self), fields(resource = %resource))]
    pub async fn delete_raw(&self, resource: &ResourceRef) -> Result<()> {
        let uri = resource.resource_path();
        self.send_checked(Method::DELETE, &uri, None).await?;
        Ok(())
    }

    /// List every custom resource in a collection, in store order
    #[instrument(skip(self), fields(collection = %scope.collection_path()))]
    pub async fn list_raw(&self, scope: &ResourceScope) -> Result<CustomResourceList> {
        let uri = scope.collection_path();
        let (_, bytes) = self.send_checked(Method::GET, &uri, None).await?;
        serde_json::from_slice(&bytes).map_err(Error::Decode)
    }
}
