//! zosfiles Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
//!
//! REST facade over the z/OSMF data-set and Unix-file services.
//!
//! # Overview
//!
//! - **API Endpoints**: `/api/v2/datasets`, `/api/v2/unixfiles` and `/api/v2/unixfiles-tags`
//! - **Runner Framework**: one request runner per remote operation (`zosmf` module)
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS and request logging
//!
//! # Architecture
//!
//! Every remote operation is a runner. A runner prepares exactly one
//! outbound request, lists the statuses that mean success, converts the
//! successful response into its result and maps failures onto
//! [`ZosmfError`]. The shared driver in [`zosmf::runner`] executes the
//! request and routes the response to one of those hooks.
//!
//! Runners are grouped into vertical slices under `features`, split into
//! **commands** (put content, create, rename, delete) and **queries**
//! (listings, content, encoding tags). Inbound `X-IBM-*` headers are
//! forwarded on every outbound call.
//!
//! # Example
//!
//! ```no_run
//! use zosfiles_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod zosmf;

// Re-export commonly used types
pub use error::{ZosmfError, ZosmfResult};
