// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use kube::Client;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use customres::config::Config;
use customres::error::BoxError;
use customres::{CustomResourceClient, DynamicObject, ObjectExt, ResourceRef, ResourceScope};

/// Read and write schema-less custom resources
#[derive(Parser)]
#[command(name = "customres", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CollectionArgs {
    group: String,
    version: String,
    plural: String,
    /// Namespace, "default" when empty
    #[arg(short, long, default_value = "")]
    namespace: String,
}

impl CollectionArgs {
    fn scope(&self) -> ResourceScope {
        ResourceScope::new(&self.group, &self.version, &self.namespace, &self.plural)
    }
}

#[derive(Args)]
struct ResourceArgs {
    #[command(flatten)]
    collection: CollectionArgs,
    name: String,
}

impl ResourceArgs {
    fn resource(&self) -> ResourceRef {
        self.collection.scope().named(&self.name)
    }
}

#[derive(Args)]
struct ManifestArgs {
    /// YAML or JSON manifest of the custom resource
    #[arg(short, long)]
    file: PathBuf,
    /// Plural to address the resource with, guessed from its kind when omitted
    #[arg(long)]
    plural: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a custom resource as JSON
    Get(ResourceArgs),
    /// Print the names of all custom resources in a collection
    List(CollectionArgs),
    /// Create a custom resource from a manifest
    Create(ManifestArgs),
    /// Replace a custom resource with a manifest
    Update(ManifestArgs),
    /// Create a custom resource or overwrite the stored one
    Apply(ManifestArgs),
    /// Create a custom resource unless it already exists
    Ensure(ManifestArgs),
    /// Delete a custom resource
    Delete(ResourceArgs),
    /// Set an annotation with a conflict-safe read-modify-write
    Annotate {
        #[command(flatten)]
        resource: ResourceArgs,
        /// Annotation as KEY=VALUE
        annotation: String,
    },
}

/// A manifest decoded once as an object and kept as bytes for raw writes
struct Manifest {
    object: DynamicObject,
    data: Vec<u8>,
}

impl Manifest {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let value: serde_json::Value = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))?;
        let object = serde_json::from_value(value.clone())
            .with_context(|| format!("Manifest {} is not a custom resource", path.display()))?;
        let data = serde_json::to_vec(&value)?;

        Ok(Manifest { object, data })
    }

    fn resource(&self, plural: Option<&str>) -> Result<ResourceRef> {
        let mut resource = self.object.resource_ref()?;
        if let Some(plural) = plural {
            resource.scope.plural = plural.to_string();
        }
        Ok(resource)
    }
}

fn parse_annotation(raw: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| anyhow!("Annotation must be KEY=VALUE, got {:?}", raw))
}

async fn run(resources: &CustomResourceClient, command: Command) -> Result<()> {
    match command {
        Command::Get(args) => {
            let object = resources.get(&args.resource()).await?;
            println!("{}", serde_json::to_string_pretty(&object)?);
        }
        Command::List(args) => {
            for object in resources.list(&args.scope()).await? {
                println!("{}", object.metadata.name.unwrap_or_default());
            }
        }
        Command::Create(args) => {
            let manifest = Manifest::load(&args.file)?;
            let resource = manifest.resource(args.plural.as_deref())?;
            resources.create_raw(&resource.scope, manifest.data).await?;
            info!("Created {}", resource);
        }
        Command::Update(args) => {
            let manifest = Manifest::load(&args.file)?;
            let resource = manifest.resource(args.plural.as_deref())?;
            resources.update_raw(&resource, manifest.data).await?;
            info!("Updated {}", resource);
        }
        Command::Apply(args) => {
            let manifest = Manifest::load(&args.file)?;
            let resource = manifest.resource(args.plural.as_deref())?;
            resources.create_or_update(&resource, manifest.data).await?;
            info!("Applied {}", resource);
        }
        Command::Ensure(args) => {
            let manifest = Manifest::load(&args.file)?;
            let resource = manifest.resource(args.plural.as_deref())?;
            let created = resources
                .create_if_not_found_else_update(&resource, manifest.data)
                .await?;
            println!("{}", if created { "created" } else { "unchanged" });
        }
        Command::Delete(args) => {
            let resource = args.resource();
            resources.delete(&resource).await?;
            info!("Deleted {}", resource);
        }
        Command::Annotate { resource, annotation } => {
            let (key, value) = parse_annotation(&annotation)?;
            let resource = resource.resource();
            resources
                .atomic_modify(&resource, |object| -> std::result::Result<(), BoxError> {
                    object
                        .metadata
                        .annotations
                        .get_or_insert_with(BTreeMap::new)
                        .insert(key.clone(), value.clone());
                    Ok(())
                })
                .await?;
            info!("Annotated {} with {}", resource, annotation);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: retry_interval={:?}, modify_timeout={:?}",
        config.retry_interval, config.modify_timeout
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let resources = CustomResourceClient::with_config(client, config);
    run(&resources, cli.command).await
}
