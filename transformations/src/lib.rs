//! Cartoon-style image transformation backends.
//!
//! Each [`ModelVariant`] is bound to a [`Cartooniser`] through a
//! [`ModelRegistry`]. The bundled [`FilterCartooniser`] runs on the CPU and
//! reads its per-variant weights lazily from a weights folder.

pub mod cartoon;
pub mod device;
pub mod error;
pub mod model;
pub mod registry;
pub mod weights;

pub use cartoon::{Cartooniser, FilterCartooniser};
pub use device::Device;
pub use error::{Result, TransformationError};
pub use model::ModelVariant;
pub use registry::ModelRegistry;
pub use weights::{StyleWeights, WeightStore};
