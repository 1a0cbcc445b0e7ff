//! Fixed scene roster
//!
//! Entities are registered once during setup from the manifest and never
//! mutated afterwards. Iteration preserves registration order, which is
//! also the draw order.

use crate::render::{AssetError, AssetProvider};
use crate::scene::entity::SceneEntity;
use crate::scene::manifest::SceneManifest;
use thiserror::Error;

/// Scene construction failures. Fatal to setup; no frame runs after one.
#[derive(Error, Debug)]
pub enum SceneError {
    /// An entity's assets failed to load
    #[error("entity {name}: {source}")]
    Asset {
        /// Entity being constructed
        name: String,
        /// Underlying asset failure
        #[source]
        source: AssetError,
    },

    /// Two roster entries share a name
    #[error("duplicate entity name {0}")]
    DuplicateName(String),

    /// The manifest lists no entities
    #[error("scene manifest has no entities")]
    EmptyManifest,
}

/// The fixed set of renderable entities.
pub struct SceneRegistry {
    entities: Vec<SceneEntity>,
}

impl SceneRegistry {
    /// Build the roster, loading each entity's assets in manifest order.
    ///
    /// The first failure aborts construction. Models already loaded stay
    /// owned by the provider, which releases them on its own teardown.
    pub fn from_manifest(
        manifest: &SceneManifest,
        assets: &mut dyn AssetProvider,
    ) -> Result<Self, SceneError> {
        if manifest.entities.is_empty() {
            return Err(SceneError::EmptyManifest);
        }

        let mut entities: Vec<SceneEntity> = Vec::with_capacity(manifest.entities.len());
        for record in &manifest.entities {
            if entities.iter().any(|entity| entity.name == record.name) {
                return Err(SceneError::DuplicateName(record.name.clone()));
            }
            let model = assets
                .load_model(&record.mesh, &record.texture)
                .map_err(|source| SceneError::Asset {
                    name: record.name.clone(),
                    source,
                })?;
            log::debug!(
                "registered entity {} ({} indices)",
                record.name,
                model.index_count
            );
            entities.push(SceneEntity {
                name: record.name.clone(),
                model,
                scale: record.scale.into(),
                offset: record.offset.into(),
                policy: (&record.policy).into(),
                technique: record.technique,
            });
        }

        log::info!("scene registry built with {} entities", entities.len());
        Ok(Self { entities })
    }

    /// Entities in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, SceneEntity> {
        self.entities.iter()
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the roster is empty (it never is after a successful build).
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity by name.
    pub fn get(&self, name: &str) -> Option<&SceneEntity> {
        self.entities.iter().find(|entity| entity.name == name)
    }
}
