// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Namespace used when a resource identity leaves it empty
pub const DEFAULT_NAMESPACE: &str = "default";

/// Prefix of every custom resource path
pub const API_PREFIX: &str = "/apis";

/// Status codes the store answers with on a successful write
pub mod status {
    /// The only accepted answer to a create (POST)
    pub const CREATED: u16 = 201;
    /// The only accepted answer to an update (PUT)
    pub const UPDATED: u16 = 200;
}

/// Status reasons the store reports in its error documents
pub mod reasons {
    pub const NOT_FOUND: &str = "NotFound";
    pub const ALREADY_EXISTS: &str = "AlreadyExists";
    pub const CONFLICT: &str = "Conflict";
}

/// Environment variables read by `Config::from_env`
pub mod env {
    /// Milliseconds to wait between two atomic modify attempts
    pub const RETRY_INTERVAL_MS: &str = "CUSTOM_RESOURCE_RETRY_INTERVAL_MS";
    /// Optional deadline in seconds for a whole atomic modify
    pub const MODIFY_TIMEOUT_SECS: &str = "CUSTOM_RESOURCE_MODIFY_TIMEOUT_SECS";
}

/// Default interval between atomic modify attempts
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 1000;
