use std::{io, process::ExitStatus};

use crossterm::style::Stylize;

use crate::port_forward::Target;

/// Errors returned by the streaming commands.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid gRPC address {addr:?}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("{addr}: {source}\n{hint}")]
    Connect {
        addr: String,
        hint: Hint,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("{hint}")]
    Unavailable {
        hint: Hint,
        #[source]
        source: tonic::Status,
    },

    #[error("stream interrupted: {0}")]
    Stream(#[source] tonic::Status),

    #[error("failed to write out record: {0}")]
    Output(#[source] io::Error),

    #[error("unable to port-forward {service}: {source}")]
    PortForward {
        service: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("port-forward of {service} exited with {status}")]
    PortForwardExit {
        service: &'static str,
        status: ExitStatus,
    },
}

/// Service a remediation hint is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Relay,
    Discovery,
}

impl Hint {
    /// Port-forward target that makes the service reachable on localhost.
    pub fn port_forward(self) -> Target {
        match self {
            Hint::Relay => Target::Cilium,
            Hint::Discovery => Target::DiscoveryEngine,
        }
    }
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hint::Relay => write!(
                f,
                "failed to connect to the gRPC server\n\
                 Possible troubleshooting:\n\
                 - Check if Hubble relay is running\n\
                 - Create a portforward to hubble relay service using\n\t{}\n\
                 - Configure the relay address using\n\t{}",
                self.port_forward().invocation().bold(),
                "accuknox log network --grpc <host:port>".bold(),
            ),
            Hint::Discovery => write!(
                f,
                "could not connect to the server. Possible troubleshooting:\n\
                 - Check if discovery engine is running\n\
                 - Create a portforward to discovery engine service using\n\t{}\n\
                 - Configure grpc server information using\n\t{}",
                self.port_forward().invocation().bold(),
                "accuknox summary --grpc <host:port>".bold(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::styles::strip_ansi;

    use super::*;

    #[test]
    fn hints_name_the_follow_up_command() {
        let relay = strip_ansi(&Hint::Relay.to_string());
        assert!(relay.contains("Check if Hubble relay is running"));
        assert!(relay.contains("accuknox port-forward cilium"));
        assert!(relay.contains("--grpc"));

        let discovery = strip_ansi(&Hint::Discovery.to_string());
        assert!(discovery.contains("discovery engine is running"));
        assert!(discovery.contains("accuknox port-forward discovery-engine"));
    }

    #[test]
    fn unavailable_displays_the_hint() {
        let err = Error::Unavailable {
            hint: Hint::Relay,
            source: tonic::Status::unavailable("connection refused"),
        };
        assert!(strip_ansi(&err.to_string()).starts_with("failed to connect to the gRPC server"));
    }
}
