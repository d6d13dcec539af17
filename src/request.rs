use std::collections::HashMap;
use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageOutputFormat};
use uuid::Uuid;

use crate::error::{AdapterError, Result};

/// An inbound work item: positional image payloads plus named values.
///
/// `queue` and `command` are routing metadata for the dispatcher and are not
/// interpreted by the adapter.
#[derive(Debug, Clone)]
pub struct RequestData {
    pub request_id: Uuid,
    pub queue: String,
    pub command: String,
    files: Vec<Vec<u8>>,
    values: HashMap<String, String>,
}

impl RequestData {
    pub fn new(queue: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            queue: queue.into(),
            command: command.into(),
            files: Vec::new(),
            values: HashMap::new(),
        }
    }

    pub fn add_file(&mut self, payload: Vec<u8>) -> &mut Self {
        self.files.push(payload);
        self
    }

    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Decodes the image payload at `index`.
    pub fn get_image(&self, index: usize) -> Result<DynamicImage> {
        let payload = self
            .files
            .get(index)
            .ok_or(AdapterError::MissingImage { index })?;
        if payload.is_empty() {
            return Err(AdapterError::MissingImage { index });
        }
        Ok(image::load_from_memory(payload)?)
    }
}

/// Encodes an image as base64 PNG for the response body.
pub fn encode_image(image: &DynamicImage) -> Result<String> {
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|e| AdapterError::Encode(e.to_string()))?;
    Ok(STANDARD.encode(png.into_inner()))
}
