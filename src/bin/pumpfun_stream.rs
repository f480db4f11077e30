use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use pumpfun_stream::protocols::pumpfun::{self, constants::PUMP_FUN_PROGRAM_NAME};
use pumpfun_stream::{
    Commitment, FilterConfig, JsonLinesSink, ProjectionSink, SessionSummary, StreamConfig,
    StreamSession, TableSink,
};

#[derive(Parser)]
#[command(author, version, about = "Stream Pump.fun instructions from a Geyser gRPC endpoint", long_about = None)]
struct Cli {
    /// Geyser gRPC endpoint
    #[arg(long, env = "ENDPOINT")]
    endpoint: String,
    /// x-token sent with every request
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Name of the transaction filter in the subscription
    #[arg(long, default_value = pumpfun_stream::config::DEFAULT_FILTER_NAME)]
    filter_name: String,
    /// Which Pump.fun instructions to watch
    #[arg(long, value_enum, default_value = "create")]
    instruction: Instruction,
    /// JSON filter file; replaces the --instruction preset
    #[arg(long)]
    filter_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "confirmed")]
    commitment: CommitmentArg,
    #[arg(long, value_enum, default_value = "json")]
    format: Format,
}

#[derive(Clone, ValueEnum)]
enum Instruction {
    Create,
    Trade,
    Migrate,
}

#[derive(Clone, ValueEnum)]
enum CommitmentArg {
    Processed,
    Confirmed,
    Finalized,
}

impl From<CommitmentArg> for Commitment {
    fn from(value: CommitmentArg) -> Self {
        match value {
            CommitmentArg::Processed => Commitment::Processed,
            CommitmentArg::Confirmed => Commitment::Confirmed,
            CommitmentArg::Finalized => Commitment::Finalized,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum Format {
    Json,
    Table,
}

fn load_filter(cli: &Cli) -> Result<FilterConfig> {
    let filter = match &cli.filter_file {
        Some(path) => {
            let data = fs::read(path).with_context(|| format!("failed to read {:?}", path))?;
            FilterConfig::from_json_slice(&data)
                .with_context(|| format!("invalid filter in {:?}", path))?
        }
        None => match cli.instruction {
            Instruction::Create => pumpfun::create(),
            Instruction::Trade => pumpfun::trade(),
            Instruction::Migrate => pumpfun::migrate(),
        },
    };
    filter.validate()?;
    Ok(filter)
}

async fn stream<K: ProjectionSink>(
    config: &StreamConfig,
    filter: &FilterConfig,
    sink: &mut K,
) -> Result<SessionSummary> {
    let (session, shutdown) = StreamSession::from_config(config, filter);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received, closing stream");
            shutdown.shutdown();
        }
    });
    Ok(session.run(config, sink).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let filter = load_filter(&cli)?;
    let config = StreamConfig::new(cli.endpoint.clone(), cli.token.clone())
        .with_filter_name(cli.filter_name.clone())
        .with_commitment(cli.commitment.clone().into());

    tracing::info!(
        program = PUMP_FUN_PROGRAM_NAME,
        filter = %config.filter_name,
        "watching {} program(s)",
        filter.program_ids.len()
    );

    let summary = match cli.format {
        Format::Json => stream(&config, &filter, &mut JsonLinesSink::new(io::stdout())).await,
        Format::Table => stream(&config, &filter, &mut TableSink::new(io::stdout())).await,
    }
    .context("geyser session failed")?;

    tracing::info!(
        state = %summary.state,
        updates = summary.updates,
        projections = summary.projections,
        "done"
    );
    Ok(())
}
