// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Path construction for namespaced custom resources.
//!
//! Every segment is lower-cased and an empty namespace means [`DEFAULT_NAMESPACE`],
//! so identities that only differ in casing address the same remote location.

use crate::constants::{API_PREFIX, DEFAULT_NAMESPACE};
use crate::error::{Error, Result};
use std::fmt;

fn namespace_or_default(namespace: &str) -> &str {
    if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    }
}

/// Path of the collection holding every resource of one kind in a namespace,
/// e.g. `/apis/tco.coreos.com/v1/namespaces/default/channeloperatorconfigs`
pub fn collection_path(group: &str, version: &str, namespace: &str, plural: &str) -> String {
    format!(
        "{}/{}/{}/namespaces/{}/{}",
        API_PREFIX,
        group.to_lowercase(),
        version.to_lowercase(),
        namespace_or_default(namespace).to_lowercase(),
        plural.to_lowercase()
    )
}

/// Path of one named resource inside its collection
pub fn resource_path(group: &str, version: &str, namespace: &str, plural: &str, name: &str) -> String {
    format!(
        "{}/{}",
        collection_path(group, version, namespace, plural),
        name.to_lowercase()
    )
}

/// Split an `apiVersion` such as `coreos.com/v1` into group and version.
///
/// The version is the last segment; the group is everything before it and may itself
/// contain `/`.
pub fn parse_group_version(api_version: &str) -> Result<(String, String)> {
    match api_version.rsplit_once('/') {
        Some((group, version)) if !group.is_empty() => Ok((group.to_string(), version.to_string())),
        _ => Err(Error::InvalidApiVersion(api_version.to_string())),
    }
}

/// Group, version, namespace and plural of a custom resource collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceScope {
    pub group: String,
    pub version: String,
    pub namespace: String,
    pub plural: String,
}

impl ResourceScope {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        namespace: impl Into<String>,
        plural: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            namespace: namespace.into(),
            plural: plural.into(),
        }
    }

    pub fn collection_path(&self) -> String {
        collection_path(&self.group, &self.version, &self.namespace, &self.plural)
    }

    /// Address a single resource in this collection
    pub fn named(&self, name: impl Into<String>) -> ResourceRef {
        ResourceRef {
            scope: self.clone(),
            name: name.into(),
        }
    }
}

/// Full identity of one custom resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub scope: ResourceScope,
    pub name: String,
}

impl ResourceRef {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        namespace: impl Into<String>,
        plural: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        ResourceScope::new(group, version, namespace, plural).named(name)
    }

    pub fn resource_path(&self) -> String {
        let s = &self.scope;
        resource_path(&s.group, &s.version, &s.namespace, &s.plural, &self.name)
    }

    pub fn collection_path(&self) -> String {
        self.scope.collection_path()
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {}/{}",
            self.scope.plural,
            self.scope.version,
            namespace_or_default(&self.scope.namespace),
            self.name
        )
    }
}
