//! Evolution chain resolution.
//!
//! Chains are walked from the base form along the first listed branch only.
//! Branching families (several evolutions from one form) collapse to that
//! single path.

use serde::{Deserialize, Serialize};

use crate::api::{CatalogSource, ChainLink, NamedResource};
use crate::error::Result;
use crate::types::image_url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub id: u32,
    pub name: String,
    pub image_url: String,
}

/// Species references along the first branch, base form first
pub fn first_branch(root: &ChainLink) -> Vec<&NamedResource> {
    let mut stages = vec![&root.species];
    let mut link = root;
    while let Some(next) = link.evolves_to.first() {
        stages.push(&next.species);
        link = next;
    }
    stages
}

/// Fetch the chain at `url` and resolve each stage's numeric id from its
/// species sub-resource.
pub async fn resolve_chain<S: CatalogSource>(
    source: &S,
    url: &str,
    image_base: &str,
) -> Result<Vec<EvolutionStage>> {
    let chain = source.evolution_chain(url).await?;

    let mut stages = Vec::new();
    for species_ref in first_branch(&chain.chain) {
        let species = source.species_at(&species_ref.url).await?;
        stages.push(EvolutionStage {
            id: species.id,
            name: species_ref.name.clone(),
            image_url: image_url(image_base, species.id),
        });
    }

    tracing::debug!("resolved {} evolution stages from {}", stages.len(), url);
    Ok(stages)
}
