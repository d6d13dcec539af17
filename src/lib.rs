//! # Cartoonise Worker
//!
//! A worker that turns photos into cartoons by handing each request to a
//! pluggable transformation backend.
//!
//! Every request is processed in isolation: a failing or panicking backend
//! produces a failure response and is counted, but never takes the worker down.
//! The backends themselves live in the `transformations` crate.
//!
//! ## Architecture
//!
//! - [`adapter`]: per-request processing, status and self-test
//! - [`invoker`]: model lookup and timed backend calls
//! - [`boundary`]: failure isolation and error reporting
//! - [`stats`]: outcome counters
//! - [`request`] / [`response`]: the request and response models
//! - [`options`]: start-up configuration
//! - [`error`]: error types and HTTP error responses
//! - [`handlers`]: HTTP request handlers for API endpoints
//!
//! ## Example
//!
//! ```no_run
//! use cartoonise_worker::{CartooniserAdapter, Options, RequestData};
//!
//! let adapter = CartooniserAdapter::new(Options::from_env().expect("invalid options"));
//!
//! let mut request = RequestData::new("cartooniser_queue", "cartoonise");
//! request
//!     .add_file(std::fs::read("portrait.jpg").expect("missing image"))
//!     .add_value("model_name", "paprika");
//!
//! let response = adapter.process(&request);
//! println!("{}", serde_json::to_string(&response).unwrap());
//! println!("{:?}", adapter.status());
//! ```

pub mod adapter;
pub mod boundary;
pub mod error;
pub mod handlers;
pub mod invoker;
pub mod options;
pub mod request;
pub mod response;
pub mod stats;

pub use adapter::CartooniserAdapter;
pub use error::{AdapterError, Result};
pub use options::Options;
pub use request::RequestData;
pub use response::{Response, SelfTestReport, StatusReport};
