use std::sync::Arc;
use std::time::Instant;

use log::info;
use transformations::{Device, ModelRegistry, ModelVariant};

use crate::boundary::{ErrorIsolationBoundary, ErrorReporter, LogReporter};
use crate::error::{AdapterError, Result};
use crate::invoker::InferenceInvoker;
use crate::options::Options;
use crate::request::{encode_image, RequestData};
use crate::response::{Response, SelfTestReport, StatusReport};
use crate::stats::{Statistics, StatisticsTracker};

/// Message returned for every failed request. Details only go to the reporter.
pub const PROCESS_FAILURE_MESSAGE: &str = "unable to process the image";

pub const SELFTEST_MESSAGE: &str = "cartoonise test successful";
pub const SELFTEST_MODEL: ModelVariant = ModelVariant::CelebaDistill;
pub const SELFTEST_IMAGE: &[u8] = include_bytes!("../assets/selftest.png");

/// Adapts cartoonise requests to the transformation backends.
pub struct CartooniserAdapter {
    opts: Options,
    device: Device,
    invoker: InferenceInvoker,
    boundary: ErrorIsolationBoundary,
    stats: StatisticsTracker,
}

impl CartooniserAdapter {
    /// Reference backends for every variant, failures written to the log.
    pub fn new(opts: Options) -> Self {
        Self::with_backends(opts, ModelRegistry::with_reference_backends(), Arc::new(LogReporter))
    }

    pub fn with_backends(
        opts: Options,
        registry: ModelRegistry,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        info!(
            "Initialising {} (default model {}, weights in {})",
            opts.module_id,
            opts.model_name,
            opts.weights_dir.display()
        );

        Self {
            opts,
            // No GPU selection; inference always runs on the CPU.
            device: Device::Cpu,
            invoker: InferenceInvoker::new(registry),
            boundary: ErrorIsolationBoundary::new(reporter),
            stats: StatisticsTracker::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Cartoonises image 0 of the request. Never fails; failures come back as a failure response.
    pub fn process(&self, data: &RequestData) -> Response {
        let response = self
            .boundary
            .isolate(data, file!(), || self.cartoonise(data))
            .unwrap_or_else(|| Response::failure(PROCESS_FAILURE_MESSAGE));

        self.stats.record(&response);
        response
    }

    fn cartoonise(&self, data: &RequestData) -> Result<Response> {
        let image = data.get_image(0)?;
        let model = self.model_for(data)?;

        let start = Instant::now();
        let outcome = self
            .invoker
            .invoke(&image, &self.opts.weights_dir, model, self.device)?;
        let process_ms = start.elapsed().as_millis() as u64;

        Ok(Response::success(
            encode_image(&outcome.image)?,
            process_ms,
            outcome.inference_ms,
        ))
    }

    /// A blank or absent `model_name` selects the configured default.
    fn model_for(&self, data: &RequestData) -> Result<ModelVariant> {
        match data.get_value("model_name").map(str::trim) {
            None | Some("") => Ok(self.opts.model_name),
            Some(name) => name
                .parse::<ModelVariant>()
                .map_err(|e| AdapterError::InvalidParameter {
                    name: "model_name".to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    pub fn status(&self) -> StatusReport {
        self.stats.snapshot().into()
    }

    pub fn statistics(&self) -> Statistics {
        self.stats.snapshot()
    }

    /// Runs the bundled fixture through [`process`](Self::process).
    ///
    /// Only checks that the pipeline completes; the output image is not inspected.
    pub fn selftest(&self) -> SelfTestReport {
        let mut request = RequestData::new(self.opts.queue_name.clone(), "cartoonise");
        request
            .add_file(SELFTEST_IMAGE.to_vec())
            .add_value("model_name", SELFTEST_MODEL.as_str());

        let result = self.process(&request);
        info!(
            "Self-test for {}. Success: {}",
            self.opts.module_id,
            result.is_success()
        );

        SelfTestReport {
            success: result.is_success(),
            message: SELFTEST_MESSAGE.to_string(),
        }
    }

    pub fn cleanup(&self) {
        let stats = self.stats.snapshot();
        info!(
            "Shutting down {}: {} inferences ({} failed), average {:.1} ms",
            self.opts.module_id,
            stats.total(),
            stats.failures,
            stats.average_ms()
        );
    }
}
