//! Flow records as emitted by the relay.
//!
//! Only the subset of the relay schema consumed by the CLI is declared here.
//! Tags follow the published `flow.proto` so unknown fields are skipped on decode.

/// One observed network event.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Flow {
    #[prost(message, optional, tag = "1")]
    pub time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(enumeration = "Verdict", tag = "2")]
    pub verdict: i32,
    /// Deprecated numeric drop reason, still filled by the datapath.
    #[prost(uint32, tag = "3")]
    pub drop_reason: u32,
    #[prost(message, optional, tag = "4")]
    pub ethernet: ::core::option::Option<Ethernet>,
    #[prost(message, optional, tag = "5")]
    pub ip: ::core::option::Option<Ip>,
    #[prost(message, optional, tag = "6")]
    pub l4: ::core::option::Option<Layer4>,
    #[prost(message, optional, tag = "8")]
    pub source: ::core::option::Option<Endpoint>,
    #[prost(message, optional, tag = "9")]
    pub destination: ::core::option::Option<Endpoint>,
    #[prost(string, tag = "11")]
    pub node_name: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "13")]
    pub source_names: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "14")]
    pub destination_names: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "15")]
    pub l7: ::core::option::Option<Layer7>,
    #[prost(message, optional, tag = "19")]
    pub event_type: ::core::option::Option<CiliumEventType>,
    #[prost(message, optional, tag = "20")]
    pub source_service: ::core::option::Option<Service>,
    #[prost(message, optional, tag = "21")]
    pub destination_service: ::core::option::Option<Service>,
    #[prost(uint32, tag = "23")]
    pub policy_match_type: u32,
    /// `None` when the direction of the packet is unknown.
    #[prost(message, optional, tag = "26")]
    pub is_reply: ::core::option::Option<bool>,
    #[prost(enumeration = "DebugCapturePoint", tag = "27")]
    pub debug_capture_point: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Endpoint {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(uint32, tag = "2")]
    pub identity: u32,
    #[prost(string, tag = "3")]
    pub namespace: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "4")]
    pub labels: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "5")]
    pub pod_name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ethernet {
    #[prost(string, tag = "1")]
    pub source: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub destination: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ip {
    #[prost(string, tag = "1")]
    pub source: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub destination: ::prost::alloc::string::String,
    #[prost(enumeration = "IpVersion", tag = "3")]
    pub ip_version: i32,
    #[prost(bool, tag = "4")]
    pub encrypted: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Layer4 {
    #[prost(oneof = "layer4::Protocol", tags = "1, 2, 3, 4, 5")]
    pub protocol: ::core::option::Option<layer4::Protocol>,
}

/// Nested message and enum types in `Layer4`.
pub mod layer4 {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Protocol {
        #[prost(message, tag = "1")]
        Tcp(super::Tcp),
        #[prost(message, tag = "2")]
        Udp(super::Udp),
        #[prost(message, tag = "3")]
        IcmPv4(super::Icmp),
        #[prost(message, tag = "4")]
        IcmPv6(super::Icmp),
        #[prost(message, tag = "5")]
        Sctp(super::Sctp),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tcp {
    #[prost(uint32, tag = "1")]
    pub source_port: u32,
    #[prost(uint32, tag = "2")]
    pub destination_port: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Udp {
    #[prost(uint32, tag = "1")]
    pub source_port: u32,
    #[prost(uint32, tag = "2")]
    pub destination_port: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Sctp {
    #[prost(uint32, tag = "1")]
    pub source_port: u32,
    #[prost(uint32, tag = "2")]
    pub destination_port: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Icmp {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub code: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Layer7 {
    #[prost(enumeration = "L7FlowType", tag = "1")]
    pub r#type: i32,
    #[prost(uint64, tag = "2")]
    pub latency_ns: u64,
    #[prost(oneof = "layer7::Record", tags = "100, 101, 102")]
    pub record: ::core::option::Option<layer7::Record>,
}

/// Nested message and enum types in `Layer7`.
pub mod layer7 {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Record {
        #[prost(message, tag = "100")]
        Dns(super::Dns),
        #[prost(message, tag = "101")]
        Http(super::Http),
        #[prost(message, tag = "102")]
        Kafka(super::Kafka),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Dns {
    #[prost(string, tag = "1")]
    pub query: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "2")]
    pub ips: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(uint32, tag = "6")]
    pub rcode: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Http {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(string, tag = "2")]
    pub method: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub url: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub protocol: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Kafka {
    #[prost(int32, tag = "1")]
    pub error_code: i32,
    #[prost(int32, tag = "2")]
    pub api_version: i32,
    #[prost(string, tag = "3")]
    pub api_key: ::prost::alloc::string::String,
    #[prost(int32, tag = "4")]
    pub correlation_id: i32,
    #[prost(string, tag = "5")]
    pub topic: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Service {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub namespace: ::prost::alloc::string::String,
}

/// Datapath message type and sub type, see [crate::monitor].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CiliumEventType {
    #[prost(int32, tag = "1")]
    pub r#type: i32,
    #[prost(int32, tag = "2")]
    pub sub_type: i32,
}

/// A predicate group evaluated by the relay.
///
/// Fields are ANDed together, values inside a field are ORed.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FlowFilter {
    #[prost(string, repeated, tag = "1")]
    pub source_ip: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "2")]
    pub source_pod: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "3")]
    pub destination_ip: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "4")]
    pub destination_pod: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(enumeration = "Verdict", repeated, tag = "5")]
    pub verdict: ::prost::alloc::vec::Vec<i32>,
    #[prost(string, repeated, tag = "7")]
    pub source_fqdn: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "8")]
    pub destination_fqdn: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "10")]
    pub source_label: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "11")]
    pub destination_label: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "13")]
    pub source_port: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "14")]
    pub destination_port: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "16")]
    pub source_service: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "17")]
    pub destination_service: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Verdict {
    VerdictUnknown = 0,
    Forwarded = 1,
    Dropped = 2,
    Error = 3,
    Audit = 4,
    Redirected = 5,
    Traced = 6,
    Translated = 7,
}

impl Verdict {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::VerdictUnknown => "VERDICT_UNKNOWN",
            Self::Forwarded => "FORWARDED",
            Self::Dropped => "DROPPED",
            Self::Error => "ERROR",
            Self::Audit => "AUDIT",
            Self::Redirected => "REDIRECTED",
            Self::Traced => "TRACED",
            Self::Translated => "TRANSLATED",
        }
    }

    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "VERDICT_UNKNOWN" => Some(Self::VerdictUnknown),
            "FORWARDED" => Some(Self::Forwarded),
            "DROPPED" => Some(Self::Dropped),
            "ERROR" => Some(Self::Error),
            "AUDIT" => Some(Self::Audit),
            "REDIRECTED" => Some(Self::Redirected),
            "TRACED" => Some(Self::Traced),
            "TRANSLATED" => Some(Self::Translated),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum L7FlowType {
    UnknownL7Type = 0,
    Request = 1,
    Response = 2,
    Sample = 3,
}

impl L7FlowType {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::UnknownL7Type => "UNKNOWN_L7_TYPE",
            Self::Request => "REQUEST",
            Self::Response => "RESPONSE",
            Self::Sample => "SAMPLE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum IpVersion {
    IpNotUsed = 0,
    IPv4 = 1,
    IPv6 = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DebugCapturePoint {
    DbgCapturePointUnknown = 0,
    DbgCaptureDelivery = 4,
    DbgCaptureFromLb = 5,
    DbgCaptureAfterV46 = 6,
    DbgCaptureAfterV64 = 7,
    DbgCaptureProxyPre = 8,
    DbgCaptureProxyPost = 9,
    DbgCaptureSnatPre = 10,
    DbgCaptureSnatPost = 11,
}

impl DebugCapturePoint {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::DbgCapturePointUnknown => "DBG_CAPTURE_POINT_UNKNOWN",
            Self::DbgCaptureDelivery => "DBG_CAPTURE_DELIVERY",
            Self::DbgCaptureFromLb => "DBG_CAPTURE_FROM_LB",
            Self::DbgCaptureAfterV46 => "DBG_CAPTURE_AFTER_V46",
            Self::DbgCaptureAfterV64 => "DBG_CAPTURE_AFTER_V64",
            Self::DbgCaptureProxyPre => "DBG_CAPTURE_PROXY_PRE",
            Self::DbgCaptureProxyPost => "DBG_CAPTURE_PROXY_POST",
            Self::DbgCaptureSnatPre => "DBG_CAPTURE_SNAT_PRE",
            Self::DbgCaptureSnatPost => "DBG_CAPTURE_SNAT_POST",
        }
    }
}
