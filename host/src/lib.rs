//! Request decoding, error envelopes and the people API operations.
//!
//! This crate sits between a web framework and the validation core. It
//! decodes request pieces into raw records ([`decode`]), runs them through
//! the specs loaded into an [`AppContext`], and turns outcomes into
//! [`Response`]s ([`envelope`]). The [`api`] module holds the operations
//! themselves; [`shapes`] holds the specs they use by default.
//!
//! # Example
//!
//! ```
//! use request_schema_host::api::{Operation, Request, dispatch};
//! use request_schema_host::decode::parse_query;
//! use request_schema_host::AppContext;
//! use serde_json::json;
//!
//! let ctx = AppContext::builtin().unwrap();
//! let request = Request {
//!     query: parse_query("name=Rocio&age=15"),
//!     ..Default::default()
//! };
//!
//! let response = dispatch(&ctx, Operation::ShowPersonQuery, &request);
//! assert_eq!(response.status.as_u16(), 422);
//! assert_eq!(response.body["detail"][0]["loc"], json!(["query", "age"]));
//! ```

pub mod api;
mod context;
pub mod decode;
pub mod envelope;
pub mod shapes;

pub use context::{AppContext, ContextError};
pub use envelope::{ErrorDetail, HostError, Response, Source, ValidationFailure};
