use serde::ser::{Serialize, SerializeMap, Serializer};

/// Result returned for every processed request.
///
/// Serialises as `{success: true, imageBase64, processMs, inferenceMs}` or
/// `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success {
        image_base64: String,
        process_ms: u64,
        inference_ms: u64,
    },
    Failure {
        error: String,
    },
}

impl Response {
    pub fn success(image_base64: String, process_ms: u64, inference_ms: u64) -> Self {
        Self::Success {
            image_base64,
            process_ms,
            inference_ms,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success {
                image_base64,
                process_ms,
                inference_ms,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("imageBase64", image_base64)?;
                map.serialize_entry("processMs", process_ms)?;
                map.serialize_entry("inferenceMs", inference_ms)?;
                map.end()
            }
            Self::Failure { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub successful_inferences: u64,
    pub failed_inferences: u64,
    pub num_inferences: u64,
    pub average_inference_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SelfTestReport {
    pub success: bool,
    pub message: String,
}
