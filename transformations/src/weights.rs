use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;

use crate::error::{Result, TransformationError};
use crate::model::ModelVariant;

/// Style parameters stored in a variant's weights file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyleWeights {
    /// Number of intensity levels kept per colour channel.
    pub levels: u8,
    /// Gaussian sigma applied before quantisation. Zero disables smoothing.
    #[serde(default)]
    pub blur_sigma: f32,
    /// Sobel magnitude above which a pixel is treated as an outline.
    pub edge_threshold: f32,
    /// How strongly outlines are darkened, in `0.0..=1.0`.
    #[serde(default = "default_edge_strength")]
    pub edge_strength: f32,
    #[serde(default = "default_saturation")]
    pub saturation: f32,
}

fn default_edge_strength() -> f32 {
    0.85
}

fn default_saturation() -> f32 {
    1.0
}

impl StyleWeights {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.levels < 2 {
            return Err(format!("levels must be at least 2, got {}", self.levels));
        }
        if !(self.blur_sigma >= 0.0) {
            return Err(format!("blur_sigma must be non-negative, got {}", self.blur_sigma));
        }
        if !(self.edge_threshold >= 0.0) {
            return Err(format!("edge_threshold must be non-negative, got {}", self.edge_threshold));
        }
        if !(0.0..=1.0).contains(&self.edge_strength) {
            return Err(format!("edge_strength must be within 0..=1, got {}", self.edge_strength));
        }
        if !(self.saturation >= 0.0) {
            return Err(format!("saturation must be non-negative, got {}", self.saturation));
        }
        Ok(())
    }
}

/// Lazily loads and caches weights per weights folder and variant.
#[derive(Debug, Default)]
pub struct WeightStore {
    cache: Mutex<HashMap<(PathBuf, ModelVariant), Arc<StyleWeights>>>,
}

impl WeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_for(weights_dir: &Path, variant: ModelVariant) -> PathBuf {
        weights_dir.join(format!("{}.json", variant.as_str()))
    }

    pub fn load(&self, weights_dir: &Path, variant: ModelVariant) -> Result<Arc<StyleWeights>> {
        let key = (weights_dir.to_path_buf(), variant);
        if let Some(weights) = self.lock().get(&key) {
            return Ok(Arc::clone(weights));
        }

        let weights = Arc::new(Self::read(weights_dir, variant)?);
        // Two callers may race on a cold entry; both read the same file, the first insert wins.
        let cached = self.lock().entry(key).or_insert(weights).clone();
        Ok(cached)
    }

    pub fn cached_len(&self) -> usize {
        self.lock().len()
    }

    fn read(weights_dir: &Path, variant: ModelVariant) -> Result<StyleWeights> {
        let path = Self::path_for(weights_dir, variant);
        log::info!("Loading {} weights from {}", variant, path.display());

        let contents = match std::fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TransformationError::MissingWeights { path });
            }
            Err(e) => return Err(e.into()),
        };

        let weights: StyleWeights =
            serde_json::from_slice(&contents).map_err(|e| TransformationError::InvalidWeights {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        weights
            .validate()
            .map_err(|reason| TransformationError::InvalidWeights { path, reason })?;

        Ok(weights)
    }

    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<(PathBuf, ModelVariant), Arc<StyleWeights>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
