//! Wire types shared by the accuknox crates.
//!
//! Messages are declared with `prost` derives and mirror the published
//! schemas of the flow relay and the discovery engine. The `client` feature
//! adds the `tonic` client stubs.

pub mod flow;
pub mod monitor;
pub mod observability;
pub mod observer;

pub use flow::{Flow, FlowFilter, Verdict};
pub use observer::{get_flows_response::ResponseTypes, GetFlowsRequest, GetFlowsResponse};
