// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::reasons;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Boxed error returned by caller-supplied modifiers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Status document the store sends back with a failed request
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub code: u16,
}

impl StoreStatus {
    /// Decode a status document, keeping the raw text when the body is not one
    pub fn from_body(code: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<StoreStatus>(body) {
            Ok(mut status) => {
                if status.code == 0 {
                    status.code = code;
                }
                status
            }
            Err(_) => StoreStatus {
                status: "Failure".to_string(),
                message: String::from_utf8_lossy(body).into_owned(),
                reason: String::new(),
                code,
            },
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reason.is_empty() {
            write!(f, "{} (code {})", self.message, self.code)
        } else {
            write!(f, "{} ({}, code {})", self.message, self.reason, self.code)
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid format of api version {0:?}, expecting <group>/<version>")]
    InvalidApiVersion(String),

    #[error("custom resource not found: {0}")]
    NotFound(StoreStatus),

    #[error("custom resource already exists: {0}")]
    AlreadyExists(StoreStatus),

    #[error("custom resource was modified concurrently: {0}")]
    Conflict(StoreStatus),

    #[error("store rejected the request: {0}")]
    Api(StoreStatus),

    #[error("unexpected status code {code} from {verb} {uri}, expecting {expected}")]
    UnexpectedStatus {
        verb: String,
        uri: String,
        code: u16,
        expected: u16,
    },

    #[error("failed to decode custom resource: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode custom resource: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Kubernetes API error: {0}")]
    Transport(#[from] kube::Error),

    #[error("failed to modify custom resource: {0}")]
    Modify(#[source] BoxError),

    #[error("gave up modifying {resource} after {attempts} attempts within {timeout:?}")]
    Timeout {
        resource: String,
        attempts: u32,
        timeout: Duration,
    },
}

impl Error {
    /// Classify a non-success response from the store
    pub fn from_response(code: u16, body: &[u8]) -> Self {
        let status = StoreStatus::from_body(code, body);
        let reason = status.reason.as_str();
        let unknown = reason.is_empty();

        if reason == reasons::NOT_FOUND || (unknown && code == 404) {
            Error::NotFound(status)
        } else if reason == reasons::ALREADY_EXISTS {
            Error::AlreadyExists(status)
        } else if reason == reasons::CONFLICT || (unknown && code == 409) {
            Error::Conflict(status)
        } else {
            Error::Api(status)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
