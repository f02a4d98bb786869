//! Projection of a relay flow into printable fields.

use std::fmt;

use accuknox_common::flow::{layer4, layer7, Flow, Verdict};
use accuknox_common::monitor;
use chrono::DateTime;

use crate::styles::Colorer;

const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// Bounds of a valid protobuf timestamp: 0001-01-01T00:00:00Z to 9999-12-31T23:59:59Z.
const MIN_TIMESTAMP_SECONDS: i64 = -62_135_596_800;
const MAX_TIMESTAMP_SECONDS: i64 = 253_402_300_799;

pub const ARROW_FORWARD: &str = "->";
pub const ARROW_REPLY: &str = "<-";
pub const ARROW_UNKNOWN: &str = "<>";

/// Render-ready fields of one flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowDisplay {
    pub timestamp: String,
    pub node: String,
    pub source: String,
    pub destination: String,
    pub source_identity: String,
    pub destination_identity: String,
    pub arrow: &'static str,
    pub flow_type: String,
    pub verdict: String,
}

impl FlowDisplay {
    /// Derives the display fields. Never fails, missing data renders empty or `N/A`.
    pub fn extract(flow: &Flow, colorer: &Colorer) -> Self {
        let (source, destination) = host_names(flow);
        let mut display = Self {
            timestamp: format_timestamp(flow.time.as_ref()),
            node: format!(" [{}]", flow.node_name),
            source: colorer.host(source),
            destination: colorer.host(destination),
            source_identity: format_identity(source_identity(flow), colorer),
            destination_identity: format_identity(destination_identity(flow), colorer),
            arrow: ARROW_FORWARD,
            flow_type: flow_type(flow),
            verdict: format_verdict(flow.verdict(), colorer),
        };

        match flow.is_reply {
            None => display.arrow = ARROW_UNKNOWN,
            Some(false) => {}
            Some(true) => {
                std::mem::swap(&mut display.source, &mut display.destination);
                std::mem::swap(
                    &mut display.source_identity,
                    &mut display.destination_identity,
                );
                display.arrow = ARROW_REPLY;
            }
        }

        display
    }
}

impl fmt::Display for FlowDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}: {} {} {} {} {} {} {}",
            self.timestamp,
            self.node,
            self.source,
            self.source_identity,
            self.arrow,
            self.destination,
            self.destination_identity,
            self.flow_type,
            self.verdict,
        )
    }
}

fn format_timestamp(ts: Option<&prost_types::Timestamp>) -> String {
    let Some(ts) = ts else {
        return "N/A".to_string();
    };

    let valid = (MIN_TIMESTAMP_SECONDS..=MAX_TIMESTAMP_SECONDS).contains(&ts.seconds)
        && (0..1_000_000_000).contains(&ts.nanos);
    if !valid {
        return "N/A".to_string();
    }

    DateTime::from_timestamp(ts.seconds, ts.nanos as u32)
        .map(|t| t.format(TIMESTAMP_LAYOUT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn source_identity(flow: &Flow) -> u32 {
    flow.source.as_ref().map_or(0, |ep| ep.identity)
}

fn destination_identity(flow: &Flow) -> u32 {
    flow.destination.as_ref().map_or(0, |ep| ep.identity)
}

fn format_identity(identity: u32, colorer: &Colorer) -> String {
    match monitor::reserved_identity(identity) {
        Some(label) => colorer.identity(format!("({label})")),
        None => colorer.identity(format!("(identity:{identity})")),
    }
}

fn format_verdict(verdict: Verdict, colorer: &Colorer) -> String {
    let name = verdict.as_str_name();
    match verdict {
        Verdict::Forwarded => colorer.verdict_forwarded(name),
        Verdict::Dropped | Verdict::Error => colorer.verdict_dropped(name),
        Verdict::Audit => colorer.verdict_audit(name),
        Verdict::VerdictUnknown | Verdict::Redirected | Verdict::Traced | Verdict::Translated => {
            name.to_string()
        }
    }
}

/// Endpoint data feeding the host name resolution.
#[derive(Debug, Default)]
struct HostParts<'a> {
    addr: &'a str,
    port: u32,
    namespace: &'a str,
    pod: &'a str,
    service: &'a str,
    names: &'a [String],
}

fn host_names(flow: &Flow) -> (String, String) {
    let mut src = HostParts {
        names: &flow.source_names,
        ..Default::default()
    };
    let mut dst = HostParts {
        names: &flow.destination_names,
        ..Default::default()
    };

    if let Some(ip) = &flow.ip {
        src.addr = &ip.source;
        dst.addr = &ip.destination;
    } else if let Some(eth) = &flow.ethernet {
        src.addr = &eth.source;
        dst.addr = &eth.destination;
    }

    if let Some(ep) = &flow.source {
        src.namespace = &ep.namespace;
        src.pod = &ep.pod_name;
    }
    if let Some(ep) = &flow.destination {
        dst.namespace = &ep.namespace;
        dst.pod = &ep.pod_name;
    }
    if let Some(svc) = &flow.source_service {
        src.namespace = &svc.namespace;
        src.service = &svc.name;
    }
    if let Some(svc) = &flow.destination_service {
        dst.namespace = &svc.namespace;
        dst.service = &svc.name;
    }

    (src.port, dst.port) = ports(flow);

    (hostname(&src), hostname(&dst))
}

fn ports(flow: &Flow) -> (u32, u32) {
    match flow.l4.as_ref().and_then(|l4| l4.protocol.as_ref()) {
        Some(layer4::Protocol::Tcp(tcp)) => (tcp.source_port, tcp.destination_port),
        Some(layer4::Protocol::Udp(udp)) => (udp.source_port, udp.destination_port),
        Some(
            layer4::Protocol::IcmPv4(_) | layer4::Protocol::IcmPv6(_) | layer4::Protocol::Sctp(_),
        )
        | None => (0, 0),
    }
}

/// Pod name, then service name, then DNS names, then the raw address.
fn hostname(parts: &HostParts<'_>) -> String {
    let host = if !parts.pod.is_empty() {
        join_namespace(parts.namespace, parts.pod)
    } else if !parts.service.is_empty() {
        join_namespace(parts.namespace, parts.service)
    } else if !parts.names.is_empty() {
        parts.names.join(",")
    } else {
        parts.addr.to_string()
    };

    if parts.port != 0 {
        join_host_port(&host, parts.port)
    } else {
        host
    }
}

fn join_namespace(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}/{name}")
    }
}

/// `host:port`, bracketing IPv6 literals.
fn join_host_port(host: &str, port: u32) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

fn flow_type(flow: &Flow) -> String {
    if let Some(l7) = &flow.l7 {
        let protocol = match l7.record {
            Some(layer7::Record::Http(_)) => "http",
            Some(layer7::Record::Dns(_)) => "dns",
            Some(layer7::Record::Kafka(_)) => "kafka",
            None => "l7",
        };
        return format!("{}-{}", protocol, l7.r#type().as_str_name().to_lowercase());
    }

    let (event_type, sub_type) = flow
        .event_type
        .as_ref()
        .map_or((monitor::MESSAGE_TYPE_UNSPEC, 0), |ev| (ev.r#type, ev.sub_type));

    match event_type {
        monitor::MESSAGE_TYPE_TRACE => monitor::trace_observation_point(sub_type as u8).into(),
        monitor::MESSAGE_TYPE_DROP => monitor::drop_reason(sub_type as u8).into(),
        monitor::MESSAGE_TYPE_POLICY_VERDICT => match flow.verdict() {
            Verdict::Forwarded | Verdict::Audit => {
                monitor::policy_match_type(flow.policy_match_type).to_string()
            }
            Verdict::Dropped => monitor::drop_reason(flow.drop_reason as u8).into(),
            // ERROR only happens for L7 events.
            _ => "UNKNOWN".to_string(),
        },
        monitor::MESSAGE_TYPE_CAPTURE => flow.debug_capture_point().as_str_name().to_string(),
        _ => "UNKNOWN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use accuknox_common::flow::{
        CiliumEventType, Endpoint, Ethernet, Http, Ip, Layer4, Layer7, Service, Tcp, Udp,
    };
    use pretty_assertions::assert_eq;

    use crate::styles::strip_ansi;

    use super::*;

    fn tcp(source_port: u32, destination_port: u32) -> Option<Layer4> {
        Some(Layer4 {
            protocol: Some(layer4::Protocol::Tcp(Tcp {
                source_port,
                destination_port,
            })),
        })
    }

    fn base_flow() -> Flow {
        Flow {
            time: Some(prost_types::Timestamp {
                seconds: 1_650_000_000,
                nanos: 123_000_000,
            }),
            node_name: "node-1".to_string(),
            verdict: Verdict::Forwarded as i32,
            ip: Some(Ip {
                source: "10.0.0.1".to_string(),
                destination: "10.0.0.2".to_string(),
                ..Default::default()
            }),
            l4: tcp(34567, 8080),
            source: Some(Endpoint {
                identity: 1234,
                ..Default::default()
            }),
            destination: Some(Endpoint {
                identity: 2,
                namespace: "ns1".to_string(),
                pod_name: "podA".to_string(),
                ..Default::default()
            }),
            event_type: Some(CiliumEventType {
                r#type: monitor::MESSAGE_TYPE_TRACE,
                sub_type: 0,
            }),
            is_reply: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn extract_plain_flow() {
        let display = FlowDisplay::extract(&base_flow(), &Colorer::disabled());

        assert_eq!(
            FlowDisplay {
                timestamp: "2022-04-15 05:20:00.123".to_string(),
                node: " [node-1]".to_string(),
                source: "10.0.0.1:34567".to_string(),
                destination: "ns1/podA:8080".to_string(),
                source_identity: "(identity:1234)".to_string(),
                destination_identity: "(world)".to_string(),
                arrow: ARROW_FORWARD,
                flow_type: "to-endpoint".to_string(),
                verdict: "FORWARDED".to_string(),
            },
            display
        );
        assert_eq!(
            "2022-04-15 05:20:00.123 [node-1]: 10.0.0.1:34567 (identity:1234) -> ns1/podA:8080 (world) to-endpoint FORWARDED",
            display.to_string()
        );
    }

    #[test]
    fn reply_swaps_endpoints() {
        let colorer = Colorer::disabled();
        let forward = FlowDisplay::extract(&base_flow(), &colorer);
        let reply = FlowDisplay::extract(
            &Flow {
                is_reply: Some(true),
                ..base_flow()
            },
            &colorer,
        );

        assert_eq!(forward.source, reply.destination);
        assert_eq!(forward.destination, reply.source);
        assert_eq!(forward.source_identity, reply.destination_identity);
        assert_eq!(forward.destination_identity, reply.source_identity);
        assert_eq!(ARROW_FORWARD, forward.arrow);
        assert_eq!(ARROW_REPLY, reply.arrow);
    }

    #[test]
    fn unknown_direction() {
        let display = FlowDisplay::extract(
            &Flow {
                is_reply: None,
                ..base_flow()
            },
            &Colorer::disabled(),
        );
        assert_eq!(ARROW_UNKNOWN, display.arrow);
        assert_eq!("10.0.0.1:34567", display.source);
    }

    #[test]
    fn host_precedence() {
        let flow = Flow {
            destination_names: vec!["api.example.com".to_string()],
            destination_service: None,
            ..base_flow()
        };
        let display = FlowDisplay::extract(&flow, &Colorer::disabled());
        assert_eq!("ns1/podA:8080", display.destination);

        let flow = Flow {
            destination: None,
            destination_service: Some(Service {
                name: "web".to_string(),
                namespace: "ns2".to_string(),
            }),
            destination_names: vec!["api.example.com".to_string()],
            ..base_flow()
        };
        let display = FlowDisplay::extract(&flow, &Colorer::disabled());
        assert_eq!("ns2/web:8080", display.destination);

        let flow = Flow {
            destination: None,
            destination_names: vec!["a.example.com".to_string(), "b.example.com".to_string()],
            l4: None,
            ..base_flow()
        };
        let display = FlowDisplay::extract(&flow, &Colorer::disabled());
        assert_eq!("a.example.com,b.example.com", display.destination);
        assert_eq!("10.0.0.1", display.source);
    }

    #[test]
    fn ipv6_is_bracketed() {
        let flow = Flow {
            ip: Some(Ip {
                source: "fd00::1".to_string(),
                destination: "fd00::2".to_string(),
                ..Default::default()
            }),
            destination: None,
            l4: Some(Layer4 {
                protocol: Some(layer4::Protocol::Udp(Udp {
                    source_port: 53,
                    destination_port: 0,
                })),
            }),
            ..base_flow()
        };
        let display = FlowDisplay::extract(&flow, &Colorer::disabled());
        assert_eq!("[fd00::1]:53", display.source);
        assert_eq!("fd00::2", display.destination);
    }

    #[test]
    fn unnamed_reserved_identity_is_a_bare_number() {
        let flow = Flow {
            source: Some(Endpoint {
                identity: 42,
                ..Default::default()
            }),
            destination: Some(Endpoint {
                identity: 256,
                ..Default::default()
            }),
            ..base_flow()
        };
        let display = FlowDisplay::extract(&flow, &Colorer::disabled());
        assert_eq!("(42)", display.source_identity);
        assert_eq!("(identity:256)", display.destination_identity);
    }

    #[test]
    fn ethernet_fallback() {
        let flow = Flow {
            ip: None,
            l4: None,
            source: None,
            destination: None,
            ethernet: Some(Ethernet {
                source: "aa:bb:cc:dd:ee:ff".to_string(),
                destination: "ff:ff:ff:ff:ff:ff".to_string(),
            }),
            ..base_flow()
        };
        let display = FlowDisplay::extract(&flow, &Colorer::disabled());
        assert_eq!("aa:bb:cc:dd:ee:ff", display.source);
        assert_eq!("(identity:0)", display.source_identity);
    }

    #[test]
    fn invalid_timestamp() {
        let display = FlowDisplay::extract(
            &Flow {
                time: None,
                ..base_flow()
            },
            &Colorer::disabled(),
        );
        assert_eq!("N/A", display.timestamp);

        let display = FlowDisplay::extract(
            &Flow {
                time: Some(prost_types::Timestamp {
                    seconds: 0,
                    nanos: -1,
                }),
                ..base_flow()
            },
            &Colorer::disabled(),
        );
        assert_eq!("N/A", display.timestamp);
    }

    #[test]
    fn l7_flow_type() {
        let flow = Flow {
            l7: Some(Layer7 {
                r#type: accuknox_common::flow::L7FlowType::Request as i32,
                record: Some(layer7::Record::Http(Http {
                    code: 200,
                    method: "GET".to_string(),
                    ..Default::default()
                })),
                ..Default::default()
            }),
            ..base_flow()
        };
        assert_eq!("http-request", flow_type(&flow));

        let flow = Flow {
            l7: Some(Layer7 {
                r#type: accuknox_common::flow::L7FlowType::Response as i32,
                ..Default::default()
            }),
            ..base_flow()
        };
        assert_eq!("l7-response", flow_type(&flow));
    }

    #[test]
    fn event_type_dispatch() {
        let drop = Flow {
            event_type: Some(CiliumEventType {
                r#type: monitor::MESSAGE_TYPE_DROP,
                sub_type: 133,
            }),
            ..base_flow()
        };
        assert_eq!("Policy denied", flow_type(&drop));

        let policy = Flow {
            event_type: Some(CiliumEventType {
                r#type: monitor::MESSAGE_TYPE_POLICY_VERDICT,
                sub_type: 0,
            }),
            policy_match_type: 2,
            ..base_flow()
        };
        assert_eq!("L3-L4", flow_type(&policy));

        let denied = Flow {
            verdict: Verdict::Dropped as i32,
            drop_reason: 181,
            ..policy.clone()
        };
        assert_eq!("Policy denied by denylist", flow_type(&denied));

        let errored = Flow {
            verdict: Verdict::Error as i32,
            ..policy
        };
        assert_eq!("UNKNOWN", flow_type(&errored));

        let capture = Flow {
            event_type: Some(CiliumEventType {
                r#type: monitor::MESSAGE_TYPE_CAPTURE,
                sub_type: 0,
            }),
            debug_capture_point: accuknox_common::flow::DebugCapturePoint::DbgCaptureDelivery
                as i32,
            ..base_flow()
        };
        assert_eq!("DBG_CAPTURE_DELIVERY", flow_type(&capture));

        let unknown = Flow {
            event_type: None,
            ..base_flow()
        };
        assert_eq!("UNKNOWN", flow_type(&unknown));
    }

    #[test]
    fn verdict_colors() {
        let colorer = Colorer::new(true);
        assert_eq!(
            colorer.verdict_forwarded("FORWARDED"),
            format_verdict(Verdict::Forwarded, &colorer)
        );
        assert_eq!(
            colorer.verdict_dropped("ERROR"),
            format_verdict(Verdict::Error, &colorer)
        );
        assert_eq!(
            colorer.verdict_audit("AUDIT"),
            format_verdict(Verdict::Audit, &colorer)
        );
        assert_eq!("TRACED", format_verdict(Verdict::Traced, &colorer));
    }

    #[test]
    fn colored_line_keeps_text() {
        let display = FlowDisplay::extract(&base_flow(), &Colorer::new(true));
        assert_eq!(
            FlowDisplay::extract(&base_flow(), &Colorer::disabled()).to_string(),
            strip_ansi(&display.to_string())
        );
    }
}
