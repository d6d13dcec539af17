use std::collections::HashMap;
use std::sync::Arc;

use crate::cartoon::{Cartooniser, FilterCartooniser};
use crate::error::{Result, TransformationError};
use crate::model::ModelVariant;
use crate::weights::WeightStore;

/// Binds each model variant to the backend that implements it.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    backends: HashMap<ModelVariant, Arc<dyn Cartooniser>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every known variant to a [`FilterCartooniser`] sharing one weight cache.
    pub fn with_reference_backends() -> Self {
        let weights = Arc::new(WeightStore::new());
        ModelVariant::ALL
            .into_iter()
            .fold(Self::new(), |registry, variant| {
                registry.bind(
                    variant,
                    Arc::new(FilterCartooniser::new(variant, Arc::clone(&weights))),
                )
            })
    }

    pub fn bind(mut self, variant: ModelVariant, backend: Arc<dyn Cartooniser>) -> Self {
        self.backends.insert(variant, backend);
        self
    }

    pub fn backend(&self, variant: ModelVariant) -> Result<Arc<dyn Cartooniser>> {
        self.backends
            .get(&variant)
            .cloned()
            .ok_or_else(|| TransformationError::UnknownModel(variant.to_string()))
    }

    pub fn is_bound(&self, variant: ModelVariant) -> bool {
        self.backends.contains_key(&variant)
    }
}
