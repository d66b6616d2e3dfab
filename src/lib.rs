//! `lca-http` is an async HTTP client for the LCA A1–A3 calculation API.
//!
//! The service typically runs on a cold-start host that may need tens of
//! seconds to wake up. The crate wraps its endpoints with a retrying,
//! timeout-bounded transport:
//! - [`LcaClient::warm_up`] — fire-and-forget boot probe, never fails
//! - [`LcaClient::calculate`] — strict calculation call with bounded retry
//! - [`LcaClient::list_epds`] — EPD catalogue lookup

mod client;
mod error;
mod options;
mod types;

pub use client::{LcaClient, DEFAULT_BASE_URL};
pub use error::LcaError;
pub use options::ClientOptions;
pub use types::{CalcLine, CalcRequest, CalcResult, CalcResultLine, EpdSummary};

pub type Result<T> = std::result::Result<T, LcaError>;
