use std::io::Write;

use accuknox_common::observability::{
    observability_client::ObservabilityClient, ConnectionSummary, NetworkSummary,
    ProcessFileSummary, Request, Response,
};
use chrono::DateTime;
use futures::{Stream, StreamExt};
use log::debug;

use crate::{
    config,
    error::{Error, Hint},
    table::{Table, TableConfig},
};

const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

static PROCESS_HEADER: [&str; 5] = [
    "SRC PROCESS",
    "DESTINATION PROCESS PATH",
    "COUNT",
    "LAST UPDATED TIME",
    "STATUS",
];
static FILE_HEADER: [&str; 5] = [
    "SRC PROCESS",
    "DESTINATION FILE PATH",
    "COUNT",
    "LAST UPDATED TIME",
    "STATUS",
];
static NETWORK_HEADER: [&str; 9] = [
    "DIRECTION",
    "PROTOCOL",
    "COMMAND",
    "POD/SVC/IP",
    "PORT",
    "NAMESPACE",
    "LABELS",
    "COUNT",
    "LAST UPDATED TIME",
];
static INGRESS_HEADER: [&str; 7] = [
    "SOURCE LABELS",
    "NAMESPACE",
    "PROTOCOL",
    "PORT",
    "COUNT",
    "LAST UPDATED TIME",
    "STATUS",
];
static EGRESS_HEADER: [&str; 7] = [
    "DESTINATION LABELS",
    "NAMESPACE",
    "PROTOCOL",
    "PORT",
    "COUNT",
    "LAST UPDATED TIME",
    "STATUS",
];

/// Summary category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Kind {
    Process,
    File,
    Network,
    Ingress,
    Egress,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Process,
        Kind::File,
        Kind::Network,
        Kind::Ingress,
        Kind::Egress,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Process => "process",
            Kind::File => "file",
            Kind::Network => "network",
            Kind::Ingress => "ingress",
            Kind::Egress => "egress",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Kind::Process => "Process Data",
            Kind::File => "File Data",
            Kind::Network => "Network Data",
            Kind::Ingress => "Ingress Rules",
            Kind::Egress => "Egress Rules",
        }
    }
}

/// Filters of a summary query. Empty strings mean no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryOptions {
    pub labels: String,
    pub namespace: String,
    pub container: String,
    pub cluster: String,
    pub pod: String,
    /// Categories to print, all of them when empty.
    pub kinds: Vec<Kind>,
}

impl SummaryOptions {
    /// Selected categories, deduplicated in display order.
    pub fn kinds(&self) -> Vec<Kind> {
        if self.kinds.is_empty() {
            return Kind::ALL.to_vec();
        }
        let mut kinds = self.kinds.clone();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    pub fn to_request(&self) -> Request {
        Request {
            label: self.labels.clone(),
            namespace: self.namespace.clone(),
            container_name: self.container.clone(),
            cluster_name: self.cluster.clone(),
            r#type: self
                .kinds()
                .iter()
                .map(Kind::name)
                .collect::<Vec<_>>()
                .join(","),
            pod_name: self.pod.clone(),
        }
    }
}

/// Renders epoch seconds, empty for zero or out of range values.
pub fn format_epoch(secs: i64) -> String {
    if secs <= 0 {
        return String::new();
    }
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.format(TIME_LAYOUT).to_string())
        .unwrap_or_default()
}

fn process_file_rows(summaries: &[ProcessFileSummary]) -> Vec<Vec<String>> {
    summaries
        .iter()
        .flat_map(|summary| {
            summary.targets.iter().map(move |target| {
                vec![
                    summary.source.clone(),
                    target.destination.clone(),
                    target.count.to_string(),
                    format_epoch(target.updated_time),
                    target.status.to_uppercase(),
                ]
            })
        })
        .collect()
}

fn network_rows(direction: &str, summaries: &[NetworkSummary]) -> Vec<Vec<String>> {
    summaries
        .iter()
        .flat_map(|summary| {
            summary.peers.iter().map(move |peer| {
                vec![
                    direction.to_string(),
                    summary.protocol.clone(),
                    summary.command.clone(),
                    peer.ip.clone(),
                    peer.port.to_string(),
                    peer.namespace.clone(),
                    peer.labels.clone(),
                    peer.count.to_string(),
                    format_epoch(peer.updated_time),
                ]
            })
        })
        .collect()
}

fn connection_rows(summaries: &[ConnectionSummary]) -> Vec<Vec<String>> {
    summaries
        .iter()
        .flat_map(|summary| {
            summary.ports.iter().map(move |port| {
                vec![
                    summary.peer_labels.clone(),
                    summary.peer_namespace.clone(),
                    port.protocol.clone(),
                    port.port.to_string(),
                    port.count.to_string(),
                    format_epoch(port.updated_time),
                    port.status.to_uppercase(),
                ]
            })
        })
        .collect()
}

fn write_identity<W: Write + ?Sized>(out: &mut W, response: &Response) -> std::io::Result<()> {
    let fields = [
        ("Pod Name", &response.pod_name),
        ("Cluster Name", &response.cluster_name),
        ("Namespace Name", &response.namespace),
        ("Labels", &response.label),
        ("Container Name", &response.container_name),
    ];
    for (name, value) in fields {
        if !value.is_empty() {
            writeln!(out, "{name:<15} : {value}")?;
        }
    }
    Ok(())
}

/// Prints one summary: the identity lines then a table per category.
pub fn render_response<W: Write + ?Sized>(
    out: &mut W,
    response: &Response,
    kinds: &[Kind],
    config: &TableConfig,
) -> std::io::Result<()> {
    writeln!(out)?;
    write_identity(out, response)?;

    for kind in kinds {
        let (header, rows) = match kind {
            Kind::Process => (
                PROCESS_HEADER.as_slice(),
                process_file_rows(&response.process_data),
            ),
            Kind::File => (
                FILE_HEADER.as_slice(),
                process_file_rows(&response.file_data),
            ),
            Kind::Network => {
                let mut rows = network_rows("INGRESS", &response.in_network_data);
                rows.extend(network_rows("EGRESS", &response.out_network_data));
                (NETWORK_HEADER.as_slice(), rows)
            }
            Kind::Ingress => (
                INGRESS_HEADER.as_slice(),
                connection_rows(&response.ingress_connection),
            ),
            Kind::Egress => (
                EGRESS_HEADER.as_slice(),
                connection_rows(&response.egress_connection),
            ),
        };

        writeln!(out, "\n{}", kind.title())?;
        let mut table = Table::new(header.iter().copied())
            .with_writer(&mut *out)
            .with_config(config.clone());
        table.set_rows(rows);
        table.print()?;
    }

    Ok(())
}

/// Prints every summary of the stream, stopping at the first error.
pub async fn render<S, W>(
    stream: S,
    out: &mut W,
    opts: &SummaryOptions,
    config: &TableConfig,
) -> Result<usize, Error>
where
    S: Stream<Item = Result<Response, tonic::Status>>,
    W: Write + ?Sized,
{
    let mut stream = std::pin::pin!(stream);
    let kinds = opts.kinds();
    let mut count = 0;

    while let Some(response) = stream.next().await {
        let response = response.map_err(Error::Stream)?;
        render_response(out, &response, &kinds, config).map_err(Error::Output)?;
        count += 1;
    }

    debug!("summary stream ended after {count} messages");
    Ok(count)
}

/// Queries the discovery engine at `addr` and prints the summaries.
pub async fn run<W: Write + ?Sized>(
    addr: &str,
    opts: &SummaryOptions,
    out: &mut W,
    config: &TableConfig,
) -> Result<usize, Error> {
    let endpoint = config::endpoint(addr)?;

    debug!("dialing discovery engine at {addr}");
    let channel = endpoint.connect().await.map_err(|source| Error::Connect {
        addr: addr.to_string(),
        hint: Hint::Discovery,
        source,
    })?;

    let request = opts.to_request();
    debug!("summary request: {request:?}");

    let response = ObservabilityClient::new(channel)
        .summary(request)
        .await
        .map_err(|source| Error::Unavailable {
            hint: Hint::Discovery,
            source,
        })?;

    render(response.into_inner(), out, opts, config).await
}
