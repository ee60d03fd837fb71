//! # Pulseboard Client
//!
//! The data access layer of the dashboard. A [`DataClient`] turns an
//! operation plus a logical resource path into an [`ApiResponse`] envelope.
//! Two implementations satisfy the same contract:
//!
//! | Client | Transport | Persistence |
//! |--------|-----------|-------------|
//! | [`InMemoryDataClient`] | none, simulated latency | fixtures, process lifetime |
//! | [`HttpDataClient`] | HTTP/JSON via reqwest | remote backend |
//!
//! [`create_data_client`] picks one from configuration at process start.
//!
//! [`ApiResponse`]: pulseboard_core::ApiResponse

mod cache;
mod client;
mod factory;
mod http;
mod memory;
mod path;

pub use cache::*;
pub use client::*;
pub use factory::*;
pub use http::*;
pub use memory::*;
pub use path::*;
