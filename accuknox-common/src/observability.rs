//! The discovery engine's observability summary service.

/// Summary query. Empty strings mean "no constraint".
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Request {
    #[prost(string, tag = "1")]
    pub label: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub namespace: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub container_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub cluster_name: ::prost::alloc::string::String,
    /// Comma separated list of categories, e.g. `process,file`.
    #[prost(string, tag = "5")]
    pub r#type: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub pod_name: ::prost::alloc::string::String,
}

/// Summary of one workload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(string, tag = "1")]
    pub pod_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub cluster_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub namespace: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub label: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub container_name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "6")]
    pub process_data: ::prost::alloc::vec::Vec<ProcessFileSummary>,
    #[prost(message, repeated, tag = "7")]
    pub file_data: ::prost::alloc::vec::Vec<ProcessFileSummary>,
    #[prost(message, repeated, tag = "8")]
    pub in_network_data: ::prost::alloc::vec::Vec<NetworkSummary>,
    #[prost(message, repeated, tag = "9")]
    pub out_network_data: ::prost::alloc::vec::Vec<NetworkSummary>,
    #[prost(message, repeated, tag = "10")]
    pub ingress_connection: ::prost::alloc::vec::Vec<ConnectionSummary>,
    #[prost(message, repeated, tag = "11")]
    pub egress_connection: ::prost::alloc::vec::Vec<ConnectionSummary>,
}

/// A source process and everything it touched.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProcessFileSummary {
    #[prost(string, tag = "1")]
    pub source: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub targets: ::prost::alloc::vec::Vec<ProcessFileTarget>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProcessFileTarget {
    #[prost(string, tag = "1")]
    pub destination: ::prost::alloc::string::String,
    #[prost(int32, tag = "2")]
    pub count: i32,
    #[prost(string, tag = "3")]
    pub status: ::prost::alloc::string::String,
    /// Epoch seconds.
    #[prost(int64, tag = "4")]
    pub updated_time: i64,
}

/// System level socket activity of one command.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NetworkSummary {
    #[prost(string, tag = "1")]
    pub protocol: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub command: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub peers: ::prost::alloc::vec::Vec<NetworkPeer>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NetworkPeer {
    /// Pod, service or raw IP of the peer.
    #[prost(string, tag = "1")]
    pub ip: ::prost::alloc::string::String,
    #[prost(int32, tag = "2")]
    pub port: i32,
    #[prost(string, tag = "3")]
    pub labels: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub namespace: ::prost::alloc::string::String,
    #[prost(int32, tag = "5")]
    pub count: i32,
    #[prost(int64, tag = "6")]
    pub updated_time: i64,
}

/// Observed L3/L4 connections with one peer workload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConnectionSummary {
    #[prost(string, tag = "1")]
    pub peer_labels: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub peer_namespace: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub ports: ::prost::alloc::vec::Vec<PortSummary>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PortSummary {
    #[prost(string, tag = "1")]
    pub protocol: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub port: u32,
    #[prost(string, tag = "3")]
    pub status: ::prost::alloc::string::String,
    #[prost(int32, tag = "4")]
    pub count: i32,
    #[prost(int64, tag = "5")]
    pub updated_time: i64,
}

/// Client stub for `v1.observability.Observability`.
#[cfg(feature = "client")]
pub mod observability_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::http::Uri;
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct ObservabilityClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl ObservabilityClient<tonic::transport::Channel> {
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

    impl<T> ObservabilityClient<T>
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

        /// Streams one summary per matching workload.
        pub async fn summary(
            &mut self,
            request: impl tonic::IntoRequest<super::Request>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::Response>>,
            tonic::Status,
        > {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/v1.observability.Observability/Summary");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new(
                "v1.observability.Observability",
                "Summary",
            ));
            self.inner.server_streaming(req, path, codec).await
        }
    }
}
