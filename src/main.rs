use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use wallet_tracker::api::{self, AppState};
use wallet_tracker::config::{
	ConfigError, DEFAULT_BASE_URL, DEFAULT_CHAIN, GatewayConfig, InputGatePolicy, RefreshPolicy,
	TrackerConfig, validate_url,
};
use wallet_tracker::indexer::{DashboardApiClient, GatewayError, GoldRushClient, LedgerGateway};
use wallet_tracker::view::render_wallet;
use wallet_tracker::wallet::{EventDispatcher, TracingEventHandler, WalletTracker};

#[derive(Debug, Parser)]
#[command(name = "wallet-tracker", version, about = "Track token balances of HyperEVM wallets")]
struct Cli {
	#[command(flatten)]
	upstream: UpstreamArgs,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Args)]
struct UpstreamArgs {
	/// GoldRush API key
	#[arg(long, env = "GOLDRUSH_API_KEY", hide_env_values = true, global = true)]
	api_key: Option<String>,

	/// GoldRush REST base URL
	#[arg(long, env = "GOLDRUSH_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
	base_url: String,

	/// Chain name used in indexer paths
	#[arg(long, env = "WALLET_TRACKER_CHAIN", default_value = DEFAULT_CHAIN, global = true)]
	chain: String,

	/// Per-request timeout in seconds
	#[arg(long, default_value_t = 30, global = true)]
	timeout_secs: u64,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Serve the /wallet/balances and /wallet/transactions routes
	Serve {
		#[arg(long, env = "WALLET_TRACKER_LISTEN", default_value = "127.0.0.1:3000")]
		listen: SocketAddr,
	},
	/// Load the given wallets and print a card for each
	Track {
		/// Wallet addresses (0x followed by 40 hex characters)
		#[arg(required = true)]
		addresses: Vec<String>,

		/// Fetch through a running `serve` instance instead of the indexer directly
		#[arg(long)]
		api_url: Option<String>,

		/// Skip the transaction summary
		#[arg(long)]
		no_transactions: bool,

		/// Give up waiting for wallets after this many seconds
		#[arg(long, default_value_t = 60)]
		wait_secs: u64,
	},
}

#[derive(Debug, thiserror::Error)]
enum AppError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Gateway(#[from] GatewayError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.with_timer(tracing_subscriber::fmt::time::time())
		.init();

	let cli = Cli::parse();
	let result = match cli.command {
		Command::Serve { listen } => serve(&cli.upstream, listen).await,
		Command::Track {
			addresses,
			api_url,
			no_transactions,
			wait_secs,
		} => {
			track(
				&cli.upstream,
				&addresses,
				api_url.as_deref(),
				!no_transactions,
				Duration::from_secs(wait_secs),
			)
			.await
		}
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{}", e);
			ExitCode::FAILURE
		}
	}
}

fn gateway_config(upstream: &UpstreamArgs) -> Result<GatewayConfig, ConfigError> {
	let api_key = upstream.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
	let config = GatewayConfig::new(api_key)
		.with_base_url(upstream.base_url.clone())
		.with_chain(upstream.chain.clone())
		.with_request_timeout(Duration::from_secs(upstream.timeout_secs));
	config.validate()?;
	Ok(config)
}

async fn serve(upstream: &UpstreamArgs, listen: SocketAddr) -> Result<(), AppError> {
	let config = gateway_config(upstream)?;
	let client = GoldRushClient::new(&config)?;
	info!("Created indexer client for {}", config.chain);

	let listener = TcpListener::bind(listen).await?;
	api::serve(listener, AppState::new(Arc::new(client), config.chain)).await?;
	Ok(())
}

async fn track(
	upstream: &UpstreamArgs,
	addresses: &[String],
	api_url: Option<&str>,
	include_transactions: bool,
	wait: Duration,
) -> Result<(), AppError> {
	let gateway: Arc<dyn LedgerGateway> = match api_url {
		Some(url) => {
			validate_url(url)?;
			Arc::new(DashboardApiClient::new(
				url,
				Duration::from_secs(upstream.timeout_secs),
			)?)
		}
		None => Arc::new(GoldRushClient::new(&gateway_config(upstream)?)?),
	};
	info!("Using {} gateway", gateway.name());

	let mut dispatcher = EventDispatcher::new();
	dispatcher.register_handler(Arc::new(TracingEventHandler));

	let tracker = WalletTracker::new(
		gateway,
		TrackerConfig {
			include_transactions,
			refresh_policy: RefreshPolicy::RetainSnapshot,
			input_gate: InputGatePolicy::AlwaysOpen,
		},
		dispatcher,
	);

	for raw in addresses {
		if let Err(e) = tracker.add(raw) {
			warn!("Skipping {:?}: {}", raw, e);
		}
	}

	if tokio::time::timeout(wait, tracker.wait_until_settled())
		.await
		.is_err()
	{
		warn!(
			"Gave up waiting after {} seconds; some wallets are still loading",
			wait.as_secs()
		);
	}

	let chain_label = &upstream.chain;
	for entry in tracker.wallets() {
		println!("{}", render_wallet(&entry, chain_label));
	}
	info!("{}", tracker.stats().summary());
	Ok(())
}
