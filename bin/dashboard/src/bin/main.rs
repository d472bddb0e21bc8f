//! Command-line front end for the token dashboard.
//!
//! - `status`: show balance, allowance and validation flags of one token
//! - `approve` / `transfer` / `mint`: submit a write and wait for it to confirm
//! - `watch`: print every state change until Ctrl-C
//! - `portfolio`: total balance across the token registry

use action::Outcome;
use alloy_primitives::Address;
use alloy_provider::Provider;
use clap::{Parser, Subcommand};
use config::NetworkConfig;
use dashboard::{
    config::Config,
    metrics::{install_prometheus_exporter, Metrics},
    render_portfolio, render_view, submit, wait_until_settled, StatusReport,
};
use ledger::{provider::ProviderGateway, Gateway};
use session::{total_balance, TokenManager, WalletContext};
use std::{sync::Arc, time::Duration};
use token::ActionKind;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Inspect and move ERC20 test tokens on Sepolia")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key for signing transactions (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Account to inspect read-only when no private key is given
    #[arg(long)]
    account: Option<Address>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show balance, allowance and flags for a token
    Status {
        #[arg(short, long, default_value = "DAI")]
        token: String,

        /// Amount to validate against balance and allowance
        #[arg(long)]
        amount: Option<String>,

        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve the connected account to spend an amount of its own tokens
    Approve {
        #[arg(short, long, default_value = "DAI")]
        token: String,

        #[arg(long)]
        amount: String,
    },

    /// Transfer an amount to the target address
    Transfer {
        #[arg(short, long, default_value = "DAI")]
        token: String,

        #[arg(long)]
        amount: String,

        /// Recipient; defaults to `target_address` from the config
        #[arg(long)]
        to: Option<String>,
    },

    /// Mint test tokens to the connected account
    Mint {
        #[arg(short, long, default_value = "DAI")]
        token: String,
    },

    /// Print every state change until Ctrl-C
    Watch {
        #[arg(short, long, default_value = "DAI")]
        token: String,
    },

    /// Total balance across every configured token
    Portfolio {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = Config::from_file(&cli.config)?;
    let network = config.network_config();

    info!(
        network = %network.name,
        chain_id = network.chain_id,
        tokens = network.tokens.len(),
        "Loaded config."
    );

    if let Some(port) = config.metrics_port {
        install_prometheus_exporter(port)?;
        info!(port, "Metrics exporter listening.");
    }
    let metrics = Metrics::new();

    match &cli.private_key {
        Some(private_key) => {
            let account = client::signer_address(private_key)?;
            let provider = client::create_wallet_provider(&config.rpc_url, private_key)?;
            run(cli.command, &config, &network, provider, Some(account), &metrics).await
        }
        None => {
            let provider = client::create_provider(&config.rpc_url)?;
            run(cli.command, &config, &network, provider, cli.account, &metrics).await
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run<P>(
    command: Command,
    config: &Config,
    network: &NetworkConfig,
    provider: P,
    account: Option<Address>,
    metrics: &Metrics,
) -> eyre::Result<()>
where
    P: Provider + Clone + 'static,
{
    let wallet = match account {
        Some(account) => WalletContext::connected(account, provider.get_chain_id().await?),
        None => WalletContext::disconnected(),
    };
    if wallet.is_wrong_network(network) {
        warn!(
            chain_id = ?wallet.chain_id,
            expected = network.chain_id,
            "Wallet is on an unsupported network; continuing without an account."
        );
    }
    let gateway = Arc::new(ProviderGateway::new(provider));

    match command {
        Command::Portfolio { json } => {
            let account = wallet.account_for(network);
            let total = total_balance(gateway.as_ref(), &network.tokens, account).await;
            metrics.set_portfolio_total(&total);
            if json {
                println!("{}", serde_json::to_string_pretty(&total)?);
            } else {
                println!("{}", render_portfolio(&total));
            }
            Ok(())
        }
        Command::Status {
            token,
            amount,
            json,
        } => {
            let manager = open(gateway, network, &token, config, &wallet, None)?;
            manager.refresh().await;
            if let Some(amount) = amount {
                manager.set_amount(amount);
            }

            let report = StatusReport::collect(&manager).await;
            record_gauges(metrics, &report);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_view(&report.view, &report.loading));
            }
            manager.shutdown().await;
            Ok(())
        }
        Command::Approve { token, amount } => {
            let manager = open(gateway, network, &token, config, &wallet, None)?;
            manager.set_amount(amount);
            let result = write(&manager, ActionKind::Approve, config, metrics).await;
            manager.shutdown().await;
            result
        }
        Command::Transfer { token, amount, to } => {
            let manager = open(gateway, network, &token, config, &wallet, to)?;
            manager.set_amount(amount);
            let result = write(&manager, ActionKind::Transfer, config, metrics).await;
            manager.shutdown().await;
            result
        }
        Command::Mint { token } => {
            let manager = open(gateway, network, &token, config, &wallet, None)?;
            let result = write(&manager, ActionKind::Mint, config, metrics).await;
            manager.shutdown().await;
            result
        }
        Command::Watch { token } => {
            let manager = open(gateway, network, &token, config, &wallet, None)?;
            let result = watch(&manager, metrics).await;
            manager.shutdown().await;
            result
        }
    }
}

fn open<G: Gateway + 'static>(
    gateway: Arc<G>,
    network: &NetworkConfig,
    symbol: &str,
    config: &Config,
    wallet: &WalletContext,
    target: Option<String>,
) -> eyre::Result<TokenManager<G>> {
    let token = network
        .token(symbol)
        .ok_or_else(|| eyre::eyre!("Unknown token {symbol} on {}", network.name))?
        .clone();
    let target = target.unwrap_or_else(|| config.target_address.clone());

    Ok(TokenManager::for_wallet(
        gateway,
        network,
        token,
        target,
        wallet,
        config.session,
    )?)
}

async fn write<G: Gateway + 'static>(
    manager: &TokenManager<G>,
    kind: ActionKind,
    config: &Config,
    metrics: &Metrics,
) -> eyre::Result<()> {
    match submit(manager, kind).await {
        Outcome::Skipped(reason) => {
            metrics.record_skipped(kind);
            warn!(kind = %kind, reason = %reason, "Nothing submitted.");
            Ok(())
        }
        Outcome::Failed(err) => {
            metrics.record_failure(kind);
            let message = err.user_message().unwrap_or_else(|| err.to_string());
            eyre::bail!(message)
        }
        Outcome::Pending(tx_hash) => {
            metrics.record_submission(kind);
            info!(kind = %kind, tx_hash = %tx_hash, "Waiting for confirmation.");

            wait_until_settled(
                manager,
                kind,
                config.session.poll_interval(),
                CONFIRMATION_TIMEOUT,
            )
            .await?;
            manager.refresh().await;

            let report = StatusReport::collect(manager).await;
            record_gauges(metrics, &report);
            println!("{}", render_view(&report.view, &report.loading));
            Ok(())
        }
    }
}

async fn watch<G: Gateway + 'static>(
    manager: &TokenManager<G>,
    metrics: &Metrics,
) -> eyre::Result<()> {
    let mut changes = manager.subscribe();
    loop {
        let report = StatusReport::collect(manager).await;
        record_gauges(metrics, &report);
        println!("{}\n", render_view(&report.view, &report.loading));

        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Stopping watch.");
                return Ok(());
            }
        }
    }
}

fn record_gauges(metrics: &Metrics, report: &StatusReport) {
    metrics.set_balance(&report.view.symbol, &report.view.balance);
    metrics.set_allowance(&report.view.symbol, &report.view.approved_amount);
}
