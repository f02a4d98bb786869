use std::io::{self, IsTerminal};

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use log::{debug, info};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use accuknox::{
    config::{RelayConfig, DEFAULT_DISCOVERY_ADDR, DEFAULT_RELAY_ADDR, DISCOVERY_SERVICE_ENV},
    network::{
        args::{filters_from_matches, FilterArgs},
        FlowSession,
    },
    port_forward::{self, Target, KUBECTL},
    styles::Colorer,
    summary::{self, Kind, SummaryOptions},
    table::TableConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Observe logs.
    Log {
        #[command(subcommand)]
        source: LogSource,
    },
    /// Policy summary from the discovery engine.
    Summary(SummaryArgs),
    /// Forward a cluster service to localhost.
    PortForward {
        #[arg(value_enum)]
        target: Target,
    },
}

#[derive(Subcommand, Debug)]
enum LogSource {
    /// Network flows from the relay.
    Network(NetworkArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    fn enabled(self) -> bool {
        match self {
            ColorWhen::Auto => io::stdout().is_terminal(),
            ColorWhen::Always => true,
            ColorWhen::Never => false,
        }
    }
}

#[derive(clap::Args, Debug)]
struct NetworkArgs {
    /// Keep streaming new flows.
    #[arg(short, long)]
    follow: bool,

    /// Relay address.
    #[arg(long, value_name = "HOST:PORT", default_value = DEFAULT_RELAY_ADDR)]
    grpc: String,

    #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,

    #[command(flatten)]
    filters: FilterArgs,
}

#[derive(clap::Args, Debug)]
struct SummaryArgs {
    /// Discovery engine address.
    #[arg(long, value_name = "HOST:PORT", env = DISCOVERY_SERVICE_ENV, default_value = DEFAULT_DISCOVERY_ADDR)]
    grpc: String,

    #[arg(long, default_value = "")]
    labels: String,

    #[arg(short, long, default_value = "")]
    namespace: String,

    #[arg(long, default_value = "")]
    container: String,

    #[arg(long, default_value = "")]
    cluster: String,

    #[arg(long, default_value = "")]
    pod: String,

    /// Categories to print, all by default.
    #[arg(long = "type", value_enum, value_delimiter = ',')]
    kinds: Vec<Kind>,
}

impl SummaryArgs {
    fn options(&self) -> SummaryOptions {
        SummaryOptions {
            labels: self.labels.clone(),
            namespace: self.namespace.clone(),
            container: self.container.clone(),
            cluster: self.cluster.clone(),
            pod: self.pod.clone(),
            kinds: self.kinds.clone(),
        }
    }
}

async fn log_network(
    args: NetworkArgs,
    matches: Option<&ArgMatches>,
    cancel: CancellationToken,
) -> Result<(), anyhow::Error> {
    let filters = match matches {
        Some(matches) => filters_from_matches(matches)?,
        None => Default::default(),
    };
    debug!("filter flags: {:?}", args.filters);
    debug!(
        "filters: {} allowed, {} denied",
        filters.allow().len(),
        filters.deny().len()
    );

    let config = RelayConfig::default()
        .addr(args.grpc)
        .follow(args.follow);
    let mut session =
        FlowSession::new(config, filters, cancel).with_colorer(Colorer::new(args.color.enabled()));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.run(&mut out).await?;

    Ok(())
}

async fn print_summary(args: SummaryArgs, cancel: CancellationToken) -> Result<(), anyhow::Error> {
    let opts = args.options();
    let config = if io::stdout().is_terminal() {
        TableConfig::default()
    } else {
        TableConfig::plain()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    tokio::select! {
        _ = cancel.cancelled() => {
            info!("Summary aborted");
            Ok(())
        }
        res = summary::run(&args.grpc, &opts, &mut out, &config) => {
            let count = res?;
            debug!("{count} summaries printed");
            Ok(())
        }
    }
}

async fn forward_port(target: Target, cancel: CancellationToken) -> Result<(), anyhow::Error> {
    info!("Forwarding {} to localhost", target.service());
    port_forward::run(KUBECTL, target, &cancel).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("Exiting...");
                cancel.cancel();
            }
        });
    }

    match args.command {
        Command::Log {
            source: LogSource::Network(args),
        } => {
            let matches = matches
                .subcommand_matches("log")
                .and_then(|log| log.subcommand_matches("network"));
            log_network(args, matches, cancel).await
        }
        Command::Summary(args) => print_summary(args, cancel).await,
        Command::PortForward { target } => forward_port(target, cancel).await,
    }
}
