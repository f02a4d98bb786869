use std::io::Write;

use accuknox_common::observer::{
    get_flows_response::ResponseTypes, observer_client::ObserverClient, GetFlowsRequest,
    GetFlowsResponse,
};
use accuknox_filter::FilterSet;
use futures::{Stream, StreamExt};
use log::{debug, trace};
use tokio_util::sync::CancellationToken;

use crate::{
    config::{self, RelayConfig},
    error::{Error, Hint},
    styles::Colorer,
};

pub mod args;
mod flow;

pub use flow::*;

/// Lifecycle of a [FlowSession].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Streaming,
    Draining,
    Cancelled,
    Failed,
    Closed,
}

/// How a receive loop ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The relay closed the stream.
    Drained,
    /// The cancellation token fired.
    Cancelled,
}

/// Builds the flow request sent to the relay.
pub fn flows_request(filters: &FilterSet, follow: bool) -> GetFlowsRequest {
    GetFlowsRequest {
        number: config::flow_count(follow),
        follow,
        whitelist: filters.allow().to_vec(),
        blacklist: filters.deny().to_vec(),
        since: None,
        until: None,
    }
}

/// Writes one line per flow until the stream ends, fails or `cancel` fires.
///
/// A fired token wins over a ready record. Non-flow responses are skipped.
pub async fn consume<S, W>(
    stream: S,
    out: &mut W,
    colorer: &Colorer,
    cancel: &CancellationToken,
) -> Result<Exit, Error>
where
    S: Stream<Item = Result<GetFlowsResponse, tonic::Status>>,
    W: Write + ?Sized,
{
    let mut stream = std::pin::pin!(stream);
    let mut flows = 0u64;

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("stream cancelled after {flows} flows");
                return Ok(Exit::Cancelled);
            }
            next = stream.next() => next,
        };

        let response = match next {
            None => {
                debug!("stream ended after {flows} flows");
                return Ok(Exit::Drained);
            }
            Some(Err(status)) => return Err(Error::Stream(status)),
            Some(Ok(response)) => response,
        };

        match response.response_types {
            Some(ResponseTypes::Flow(flow)) => {
                writeln!(out, "{}", FlowDisplay::extract(&flow, colorer)).map_err(Error::Output)?;
                flows += 1;
            }
            Some(ResponseTypes::NodeStatus(status)) => {
                trace!("node status from {}: {:?}", response.node_name, status);
            }
            Some(ResponseTypes::LostEvents(lost)) => {
                trace!("{} events lost", lost.num_events_lost);
            }
            None => trace!("empty response from {}", response.node_name),
        }
    }
}

/// A single flow stream against the relay.
#[derive(Debug)]
pub struct FlowSession {
    config: RelayConfig,
    filters: FilterSet,
    colorer: Colorer,
    cancel: CancellationToken,
    state: SessionState,
}

impl FlowSession {
    pub fn new(config: RelayConfig, filters: FilterSet, cancel: CancellationToken) -> Self {
        Self {
            config,
            filters,
            colorer: Colorer::default(),
            cancel,
            state: SessionState::Idle,
        }
    }

    pub fn with_colorer(mut self, colorer: Colorer) -> Self {
        self.colorer = colorer;
        self
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        debug!("flow session {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Streams flows into `out`.
    ///
    /// Returns `Ok` when the relay ends the stream or the session is cancelled.
    /// The connection is dropped before returning.
    pub async fn run<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), Error> {
        self.transition(SessionState::Connecting);

        let res = self.stream(out).await;
        match &res {
            Ok(Exit::Drained) => self.transition(SessionState::Draining),
            Ok(Exit::Cancelled) => self.transition(SessionState::Cancelled),
            Err(_) => self.transition(SessionState::Failed),
        }
        self.transition(SessionState::Closed);

        res.map(|_| ())
    }

    async fn stream<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<Exit, Error> {
        let cancel = self.cancel.clone();
        let addr = self.config.addr.clone();
        let endpoint = config::endpoint(&addr)?;

        debug!("dialing relay at {addr}");
        let channel = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(Exit::Cancelled),
            res = endpoint.connect() => res.map_err(|source| Error::Connect {
                addr,
                hint: Hint::Relay,
                source,
            })?,
        };

        let request = flows_request(&self.filters, self.config.follow);
        debug!(
            "requesting {} flows (follow={}, allow={}, deny={})",
            request.number,
            request.follow,
            request.whitelist.len(),
            request.blacklist.len()
        );

        let mut client = ObserverClient::new(channel);
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(Exit::Cancelled),
            res = client.get_flows(request) => res.map_err(|source| Error::Unavailable {
                hint: Hint::Relay,
                source,
            })?,
        };

        self.transition(SessionState::Streaming);
        consume(response.into_inner(), out, &self.colorer, &cancel).await
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use accuknox_common::flow::{Flow, Ip, Verdict};
    use accuknox_common::observer::{LostEvent, NodeStatusEvent};
    use accuknox_filter::{Dimension, Direction, FilterBuilder};
    use futures::stream;
    use pretty_assertions::assert_eq;

    use super::*;

    fn flow_response(src: &str) -> Result<GetFlowsResponse, tonic::Status> {
        Ok(GetFlowsResponse {
            node_name: "node-1".to_string(),
            response_types: Some(ResponseTypes::Flow(Flow {
                node_name: "node-1".to_string(),
                verdict: Verdict::Forwarded as i32,
                ip: Some(Ip {
                    source: src.to_string(),
                    destination: "10.0.0.254".to_string(),
                    ..Default::default()
                }),
                is_reply: Some(false),
                ..Default::default()
            })),
            ..Default::default()
        })
    }

    fn lines(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out)
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn request_counts() {
        let filters = FilterSet::default();
        assert_eq!(20, flows_request(&filters, false).number);
        assert_eq!(u64::MAX, flows_request(&filters, true).number);
        assert!(flows_request(&filters, true).follow);
        assert_eq!(None, flows_request(&filters, false).since);
    }

    #[test]
    fn request_carries_filters() {
        let mut builder = FilterBuilder::new();
        builder
            .push(Direction::Source, Dimension::Ip, "10.0.0.1")
            .unwrap()
            .not()
            .push(Direction::Destination, Dimension::Port, "53")
            .unwrap();
        let request = flows_request(&builder.build(), false);

        assert_eq!(1, request.whitelist.len());
        assert_eq!(vec!["10.0.0.1".to_string()], request.whitelist[0].source_ip);
        assert_eq!(1, request.blacklist.len());
        assert_eq!(vec!["53".to_string()], request.blacklist[0].destination_port);
    }

    #[tokio::test]
    async fn prints_flows_in_arrival_order() {
        let responses = stream::iter(vec![
            flow_response("10.0.0.1"),
            Ok(GetFlowsResponse {
                response_types: Some(ResponseTypes::NodeStatus(NodeStatusEvent::default())),
                ..Default::default()
            }),
            flow_response("10.0.0.2"),
            Ok(GetFlowsResponse {
                response_types: Some(ResponseTypes::LostEvents(LostEvent {
                    num_events_lost: 3,
                    ..Default::default()
                })),
                ..Default::default()
            }),
            Ok(GetFlowsResponse::default()),
            flow_response("10.0.0.3"),
        ]);

        let mut out = Vec::new();
        let exit = consume(
            responses,
            &mut out,
            &Colorer::disabled(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(Exit::Drained, exit);
        let lines = lines(&out);
        assert_eq!(3, lines.len());
        for (line, src) in lines.iter().zip(["10.0.0.1", "10.0.0.2", "10.0.0.3"]) {
            assert!(line.contains(&format!(": {src} (identity:0) -> 10.0.0.254")), "{line}");
        }
    }

    #[tokio::test]
    async fn cancelled_token_wins_over_pending_records() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let responses = stream::repeat_with(|| flow_response("10.0.0.1"));
        let mut out = Vec::new();
        let exit = consume(responses, &mut out, &Colorer::disabled(), &cancel)
            .await
            .unwrap();

        assert_eq!(Exit::Cancelled, exit);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn cancel_interrupts_an_idle_stream() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let responses = stream::iter(vec![flow_response("10.0.0.1")])
            .chain(stream::pending::<Result<GetFlowsResponse, tonic::Status>>());
        let mut out = Vec::new();
        let exit = consume(responses, &mut out, &Colorer::disabled(), &cancel)
            .await
            .unwrap();

        assert_eq!(Exit::Cancelled, exit);
        assert_eq!(1, lines(&out).len());
    }

    #[tokio::test]
    async fn transport_error_stops_the_stream() {
        let responses = stream::iter(vec![
            flow_response("10.0.0.1"),
            Err(tonic::Status::internal("relay went away")),
            flow_response("10.0.0.2"),
        ]);

        let mut out = Vec::new();
        let err = consume(
            responses,
            &mut out,
            &Colorer::disabled(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Stream(status) if status.code() == tonic::Code::Internal));
        assert_eq!(1, lines(&out).len());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn write_failure_is_fatal() {
        let responses = stream::iter(vec![flow_response("10.0.0.1")]);
        let err = consume(
            responses,
            &mut BrokenPipe,
            &Colorer::disabled(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Output(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[tokio::test]
    async fn invalid_address_fails_before_dialing() {
        let mut session = FlowSession::new(
            RelayConfig::default().addr("local host:4245"),
            FilterSet::default(),
            CancellationToken::new(),
        );
        assert_eq!(SessionState::Idle, session.state());

        let err = session.run(&mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidAddress { .. }));
        assert_eq!(SessionState::Closed, session.state());
    }

    #[tokio::test]
    async fn unreachable_relay_carries_the_relay_hint() {
        let mut session = FlowSession::new(
            RelayConfig::default().addr("127.0.0.1:1"),
            FilterSet::default(),
            CancellationToken::new(),
        );

        let err = session.run(&mut Vec::new()).await.unwrap_err();
        let message = crate::styles::strip_ansi(&err.to_string());
        assert!(matches!(
            err,
            Error::Connect {
                hint: Hint::Relay,
                ..
            }
        ));
        assert_eq!(SessionState::Closed, session.state());
        assert!(message.starts_with("127.0.0.1:1: "));
        assert_eq!(1, message.matches("failed to connect").count());
        assert!(message.contains("accuknox port-forward cilium"));
    }

    #[tokio::test]
    async fn cancelled_session_is_graceful() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut session = FlowSession::new(
            RelayConfig::default().follow(true),
            FilterSet::default(),
            cancel,
        );
        let mut out = Vec::new();
        session.run(&mut out).await.unwrap();

        assert_eq!(SessionState::Closed, session.state());
        assert!(out.is_empty());
    }
}
