//! `accuknox port-forward`: exposes the in-cluster services on localhost.
//!
//! `kubectl port-forward` runs in the foreground with its output on the
//! terminal until it exits or the command is cancelled.

use std::process::Stdio;

use log::{debug, info};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::error::Error;

pub const KUBECTL: &str = "kubectl";

const CILIUM_ARGS: &[&str] = &[
    "-n",
    "kube-system",
    "port-forward",
    "service/hubble-relay",
    "--address",
    "0.0.0.0",
    "--address",
    "::",
    "4245:80",
];

const DISCOVERY_ENGINE_ARGS: &[&str] = &[
    "-n",
    "explorer",
    "port-forward",
    "service/knoxautopolicy",
    "--address",
    "0.0.0.0",
    "--address",
    "::",
    "9089:9089",
];

/// Service to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
    /// Hubble relay, on port 4245.
    Cilium,
    /// Discovery engine, on port 9089.
    DiscoveryEngine,
}

impl Target {
    /// Human name used in diagnostics.
    pub fn service(self) -> &'static str {
        match self {
            Target::Cilium => "cilium",
            Target::DiscoveryEngine => "discovery engine",
        }
    }

    /// Command line a user types to forward this target.
    pub fn invocation(self) -> &'static str {
        match self {
            Target::Cilium => "accuknox port-forward cilium",
            Target::DiscoveryEngine => "accuknox port-forward discovery-engine",
        }
    }

    pub fn kubectl_args(self) -> &'static [&'static str] {
        match self {
            Target::Cilium => CILIUM_ARGS,
            Target::DiscoveryEngine => DISCOVERY_ENGINE_ARGS,
        }
    }
}

/// Runs `program` with the target's port-forward arguments until it exits or
/// `cancel` fires. Cancelling kills the child and is not an error.
pub async fn run(program: &str, target: Target, cancel: &CancellationToken) -> Result<(), Error> {
    let args = target.kubectl_args();
    debug!("{program} {}", args.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Error::PortForward {
            service: target.service(),
            source,
        })?;

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            info!("Stopping port-forward of {}", target.service());
            child.kill().await.map_err(|source| Error::PortForward {
                service: target.service(),
                source,
            })
        }
        status = child.wait() => {
            let status = status.map_err(|source| Error::PortForward {
                service: target.service(),
                source,
            })?;
            if status.success() {
                Ok(())
            } else {
                Err(Error::PortForwardExit {
                    service: target.service(),
                    status,
                })
            }
        }
    }
}
