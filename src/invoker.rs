use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use transformations::{Device, ModelRegistry, ModelVariant, Result};

/// Image produced by a backend together with the time the backend took.
#[derive(Debug, Clone)]
pub struct InferenceOutcome {
    pub image: DynamicImage,
    pub inference_ms: u64,
}

/// Calls the backend bound to a model variant and times the call.
///
/// Backend errors are returned untouched; weight loading and caching belong to
/// the backend.
#[derive(Clone)]
pub struct InferenceInvoker {
    registry: ModelRegistry,
}

impl InferenceInvoker {
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn invoke(
        &self,
        image: &DynamicImage,
        weights_dir: &Path,
        model: ModelVariant,
        device: Device,
    ) -> Result<InferenceOutcome> {
        let backend = self.registry.backend(model)?;

        let start = Instant::now();
        let output = backend.cartoonise(image, weights_dir, device)?;
        let inference_ms = start.elapsed().as_millis() as u64;

        log::debug!("{} on {} finished in {} ms", model, device, inference_ms);
        Ok(InferenceOutcome {
            image: output,
            inference_ms,
        })
    }
}
