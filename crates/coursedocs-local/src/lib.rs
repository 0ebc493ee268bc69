//! Concrete implementations for coursedocs: the Drive URL normalizer, the
//! compiled-in and remote mapping sources, and the iframe embedding
//! surface.

use coursedocs_core::{MappingSource, Resolver, Result};

pub mod drive;
pub mod remote;
pub mod seed;
pub mod viewer;

/// List a source and build the resolver over it, enforcing the
/// collection's uniqueness invariant at the one assembly point.
pub async fn load_resolver(source: &dyn MappingSource) -> Result<Resolver> {
    let mappings = source.list_mappings().await?;
    tracing::debug!(source = source.name(), count = mappings.len(), "loaded mappings");
    Resolver::new(mappings)
}
