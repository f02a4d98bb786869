//! Streaming clients behind `accuknox log network` and `accuknox summary`.
//!
//! [network] follows the relay's flow stream and prints one line per flow,
//! [summary] prints the discovery engine's per-workload summaries as tables.
//! [port_forward] makes either service reachable on localhost.

pub mod config;
pub mod error;
pub mod network;
pub mod port_forward;
pub mod styles;
pub mod summary;
pub mod table;

pub use error::Error;
