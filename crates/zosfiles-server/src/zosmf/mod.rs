//! z/OSMF request-runner framework
//!
//! - **connector**: URL resolution and the HTTP transport
//! - **request**: the immutable outbound request a runner prepares
//! - **response**: buffered response with cached text and JSON views
//! - **rules**: ordered failure classification shared by all runners
//! - **runner**: the `Runner` trait and the classify pipeline
//!
//! The operation runners themselves live next to their routes in
//! `crate::features`.

pub mod connector;
pub mod request;
pub mod response;
pub mod rules;
pub mod runner;

pub use connector::{Connector, HttpConnector, TransportError};
pub use request::{PreparedRequest, RequestBody};
pub use response::{RawResponse, ResponseCache, ResponseError};
pub use runner::{run, Runner};
