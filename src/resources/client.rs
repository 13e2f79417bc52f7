// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource client built on top of a `kube::Client`

use crate::config::Config;
use kube::Client;

/// Reads and writes schema-less custom resources through raw API requests.
///
/// Nothing is cached: every operation round-trips to the API server.
#[derive(Clone)]
pub struct CustomResourceClient {
    pub(crate) client: Client,
    pub(crate) config: Config,
}

impl CustomResourceClient {
    /// Create a client with the default configuration
    pub fn new(client: Client) -> Self {
        Self::with_config(client, Config::default())
    }

    pub fn with_config(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
