//! The relay's observer service.

use crate::flow::{Flow, FlowFilter};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFlowsRequest {
    /// Number of flows to return, `u64::MAX` asks for everything.
    #[prost(uint64, tag = "1")]
    pub number: u64,
    #[prost(bool, tag = "3")]
    pub follow: bool,
    /// Flows matching any of these groups are excluded.
    #[prost(message, repeated, tag = "5")]
    pub blacklist: ::prost::alloc::vec::Vec<FlowFilter>,
    /// Only flows matching at least one of these groups are included.
    #[prost(message, repeated, tag = "6")]
    pub whitelist: ::prost::alloc::vec::Vec<FlowFilter>,
    #[prost(message, optional, tag = "7")]
    pub since: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "8")]
    pub until: ::core::option::Option<::prost_types::Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFlowsResponse {
    #[prost(string, tag = "1000")]
    pub node_name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "1001")]
    pub time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(oneof = "get_flows_response::ResponseTypes", tags = "1, 2, 3")]
    pub response_types: ::core::option::Option<get_flows_response::ResponseTypes>,
}

/// Nested message and enum types in `GetFlowsResponse`.
pub mod get_flows_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum ResponseTypes {
        #[prost(message, tag = "1")]
        Flow(super::Flow),
        #[prost(message, tag = "2")]
        NodeStatus(super::NodeStatusEvent),
        #[prost(message, tag = "3")]
        LostEvents(super::LostEvent),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeStatusEvent {
    #[prost(int32, tag = "1")]
    pub state_change: i32,
    #[prost(string, repeated, tag = "2")]
    pub node_names: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "3")]
    pub message: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LostEvent {
    #[prost(int32, tag = "1")]
    pub source: i32,
    #[prost(uint64, tag = "2")]
    pub num_events_lost: u64,
}

/// Client stub for `observer.Observer`.
#[cfg(feature = "client")]
pub mod observer_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::http::Uri;
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct ObserverClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl ObserverClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> ObserverClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }

        /// Streams flows matching the request's filters.
        pub async fn get_flows(
            &mut self,
            request: impl tonic::IntoRequest<super::GetFlowsRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::GetFlowsResponse>>,
            tonic::Status,
        > {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/observer.Observer/GetFlows");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("observer.Observer", "GetFlows"));
            self.inner.server_streaming(req, path, codec).await
        }
    }
}
