//! Naming tables of the datapath monitor.
//!
//! The relay forwards raw numeric codes for event types, observation points,
//! drop reasons and policy match types. These helpers turn them into the
//! names printed by the datapath tooling.

use std::borrow::Cow;

pub const MESSAGE_TYPE_UNSPEC: i32 = 0;
pub const MESSAGE_TYPE_DROP: i32 = 1;
pub const MESSAGE_TYPE_CAPTURE: i32 = 3;
pub const MESSAGE_TYPE_TRACE: i32 = 4;
pub const MESSAGE_TYPE_POLICY_VERDICT: i32 = 5;

/// Upper bound (exclusive) of the reserved identity range.
pub const MINIMAL_NUMERIC_IDENTITY: u32 = 256;

/// Name of a trace observation point, or its number when unknown.
pub fn trace_observation_point(point: u8) -> Cow<'static, str> {
    let name = match point {
        0 => "to-endpoint",
        1 => "to-proxy",
        2 => "to-host",
        3 => "to-stack",
        4 => "to-overlay",
        5 => "from-endpoint",
        6 => "from-proxy",
        7 => "from-host",
        8 => "from-stack",
        9 => "from-overlay",
        10 => "from-network",
        11 => "to-network",
        _ => return Cow::Owned(point.to_string()),
    };
    Cow::Borrowed(name)
}

/// Description of a drop reason, or its number when unknown.
pub fn drop_reason(reason: u8) -> Cow<'static, str> {
    let name = match reason {
        0 => "Success",
        2 => "Invalid packet",
        3 => "Interface",
        4 => "Interface Decrypted",
        5 => "LB, sock cgroup: No backend slot entry found",
        6 => "LB, sock cgroup: No backend entry found",
        7 => "LB, sock cgroup: Reverse entry update failed",
        8 => "LB, sock cgroup: Reverse entry stale",
        9 => "Fragmented packet",
        10 => "Fragmented packet entry update failed",
        11 => "Missed tail call to custom program",
        130 => "Invalid source mac",
        131 => "Invalid destination mac",
        132 => "Invalid source ip",
        133 => "Policy denied",
        134 => "Invalid packet",
        135 => "CT: Truncated or invalid header",
        136 => "Fragmentation needed",
        137 => "CT: Unknown L4 protocol",
        138 => "CT: Can't create entry from packet",
        139 => "Unsupported L3 protocol",
        140 => "Missed tail call",
        141 => "Error writing to packet",
        142 => "Unknown L4 protocol",
        143 => "Unknown ICMPv4 code",
        144 => "Unknown ICMPv4 type",
        145 => "Unknown ICMPv6 code",
        146 => "Unknown ICMPv6 type",
        147 => "Error retrieving tunnel key",
        148 => "Error retrieving tunnel options",
        149 => "Invalid Geneve option",
        150 => "Unknown L3 target address",
        151 => "Stale or unroutable IP",
        152 => "No matching local container found",
        153 => "Error while correcting L3 checksum",
        154 => "Error while correcting L4 checksum",
        155 => "CT: Map insertion failed",
        156 => "Invalid IPv6 extension header",
        157 => "IP fragmentation not supported",
        158 => "Service backend not found",
        160 => "No tunnel/encapsulation endpoint (datapath BUG!)",
        161 => "NAT 46/64 not enabled",
        162 => "Reached EDT horizon",
        163 => "Unknown connection tracking state",
        164 => "Local host is unreachable",
        165 => "No configuration available to perform policy decision",
        166 => "Unsupported L2 protocol",
        167 => "No mapping for NAT masquerade",
        168 => "Unsupported protocol for NAT masquerade",
        169 => "FIB lookup failed",
        170 => "Encapsulation traffic is prohibited",
        171 => "Invalid identity",
        172 => "Unknown sender",
        173 => "NAT not needed",
        174 => "Is a ClusterIP",
        175 => "First logical datagram fragment not found",
        176 => "Forbidden ICMPv6 message",
        177 => "Denied by LB src range check",
        178 => "Socket lookup failed",
        179 => "Socket assign failed",
        180 => "Proxy redirection not supported for protocol",
        181 => "Policy denied by denylist",
        _ => return Cow::Owned(reason.to_string()),
    };
    Cow::Borrowed(name)
}

/// Name of the policy match type attached to a policy verdict.
pub fn policy_match_type(match_type: u32) -> &'static str {
    match match_type {
        0 => "none",
        1 => "L3-Only",
        2 => "L3-L4",
        3 => "L4-Only",
        4 => "all",
        5 => "L3-Proto",
        6 => "Proto-Only",
        _ => "unknown",
    }
}

/// Label of a reserved security identity, `None` outside the reserved range.
///
/// Reserved identities without a name are labelled with their number.
pub fn reserved_identity(identity: u32) -> Option<Cow<'static, str>> {
    if identity == 0 || identity >= MINIMAL_NUMERIC_IDENTITY {
        return None;
    }
    let name = match identity {
        1 => "host",
        2 => "world",
        3 => "unmanaged",
        4 => "health",
        5 => "init",
        6 => "remote-node",
        7 => "kube-apiserver",
        8 => "ingress",
        9 => "world-ipv4",
        10 => "world-ipv6",
        _ => return Some(identity.to_string().into()),
    };
    Some(name.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_render_as_numbers() {
        assert_eq!("to-endpoint", trace_observation_point(0));
        assert_eq!("to-network", trace_observation_point(11));
        assert_eq!("42", trace_observation_point(42));

        assert_eq!("Policy denied", drop_reason(133));
        assert_eq!("1", drop_reason(1));

        assert_eq!("L3-L4", policy_match_type(2));
        assert_eq!("unknown", policy_match_type(99));
    }

    #[test]
    fn reserved_identities() {
        assert_eq!(None, reserved_identity(0));
        assert_eq!(Some("world".into()), reserved_identity(2));
        assert_eq!(Some("kube-apiserver".into()), reserved_identity(7));
        assert_eq!(Some("42".into()), reserved_identity(42));
        assert_eq!(Some("255".into()), reserved_identity(MINIMAL_NUMERIC_IDENTITY - 1));
        assert_eq!(None, reserved_identity(MINIMAL_NUMERIC_IDENTITY));
        assert_eq!(None, reserved_identity(12345));
    }
}
