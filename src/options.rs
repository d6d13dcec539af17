use std::path::PathBuf;

use transformations::ModelVariant;

use crate::error::Result;

/// Worker settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Options {
    pub module_id: String,
    pub queue_name: String,
    /// Model used when a request does not name one.
    pub model_name: ModelVariant,
    pub weights_dir: PathBuf,
    /// Cap on the bytes buffered from one multipart upload.
    pub max_upload_bytes: usize,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

impl Options {
    pub fn new(model_name: ModelVariant, weights_dir: impl Into<PathBuf>) -> Self {
        Self {
            module_id: "Cartooniser".to_string(),
            queue_name: "cartooniser_queue".to_string(),
            model_name,
            weights_dir: weights_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Reads `MODEL_NAME`, `WEIGHTS_FOLDER`, `MODULE_ID`, `QUEUE_NAME` and `MAX_UPLOAD_BYTES`.
    ///
    /// An unrecognised `MODEL_NAME` is rejected here rather than on the first request.
    pub fn from_env() -> Result<Self> {
        let model_name = match std::env::var("MODEL_NAME") {
            Ok(name) => name.parse()?,
            Err(_) => ModelVariant::CelebaDistill,
        };
        let weights_dir = std::env::var("WEIGHTS_FOLDER").unwrap_or_else(|_| "weights".to_string());

        let mut options = Self::new(model_name, weights_dir);
        if let Ok(module_id) = std::env::var("MODULE_ID") {
            options.module_id = module_id;
        }
        if let Ok(queue_name) = std::env::var("QUEUE_NAME") {
            options.queue_name = queue_name;
        }
        if let Some(limit) = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|l| l.parse().ok())
        {
            options.max_upload_bytes = limit;
        }
        Ok(options)
    }
}
