// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Addressing, CRUD and atomic modification of schema-less custom resources.

pub mod client;
pub mod modify;
pub mod object;
pub mod paths;
pub mod raw;
pub mod typed;
pub mod upsert;

pub use client::CustomResourceClient;
pub use object::{CustomResourceList, ObjectExt};
pub use paths::{collection_path, parse_group_version, resource_path, ResourceRef, ResourceScope};
