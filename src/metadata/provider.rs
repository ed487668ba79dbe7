//! SchemaMetadataProvider trait definition.
//!
//! The SchemaMetadataProvider trait abstracts over the service that describes
//! objects and their relationships. The navigator only ever talks to this
//! trait; [`StaticMetadataProvider`](super::StaticMetadataProvider) is the
//! file-backed implementation used by the CLI and tests.

use async_trait::async_trait;

use super::error::MetadataResult;
use super::types::{ObjectInfo, RelationalFields};

/// Trait for fetching schema metadata.
///
/// # Example
///
/// ```ignore
/// use relnav::metadata::SchemaMetadataProvider;
///
/// async fn example(provider: &impl SchemaMetadataProvider) -> MetadataResult<()> {
///     let objects = provider.search_objects("acc").await?;
///     let fields = provider.get_relational_fields(&objects[0].name).await?;
///     println!("{} lookups", fields.lookups.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SchemaMetadataProvider: Send + Sync {
    // =========================================================================
    // Service calls (async, may fail)
    // =========================================================================

    /// Get the direct fields, lookups and child relationships of an object.
    async fn get_relational_fields(&self, object_name: &str) -> MetadataResult<RelationalFields>;

    /// List every object that can be used as a navigation root.
    async fn list_objects(&self) -> MetadataResult<Vec<ObjectInfo>>;

    // =========================================================================
    // Derived operations (default implementations)
    // =========================================================================

    /// Find objects whose name contains `query`, ignoring case.
    ///
    /// A blank query matches nothing, so an empty search box shows an
    /// empty result list rather than every object.
    async fn search_objects(&self, query: &str) -> MetadataResult<Vec<ObjectInfo>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(vec![]);
        }

        let objects = self.list_objects().await?;
        Ok(objects
            .into_iter()
            .filter(|o| o.name.to_lowercase().contains(&query))
            .collect())
    }
}
