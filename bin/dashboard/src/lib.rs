pub mod config;
pub mod metrics;

use action::Outcome;
use ledger::Gateway;
use serde::Serialize;
use session::{LoadingFlags, PortfolioTotal, TokenManager, TokenView};
use std::time::Duration;
use tokio::time;
use token::ActionKind;
use tracing::debug;

/// What `status --json` prints.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub view: TokenView,
    pub loading: LoadingFlags,
}

impl StatusReport {
    pub async fn collect<G: Gateway + 'static>(manager: &TokenManager<G>) -> Self {
        Self {
            view: manager.view(),
            loading: manager.loading().await,
        }
    }
}

/// Submit the action `kind` names through the session.
pub async fn submit<G: Gateway + 'static>(manager: &TokenManager<G>, kind: ActionKind) -> Outcome {
    match kind {
        ActionKind::Approve => manager.approve().await,
        ActionKind::Transfer => manager.transfer().await,
        ActionKind::Mint => manager.mint().await,
    }
}

/// Block until the last `kind` submission stops confirming.
///
/// Queries the session once per `every`; gives up after `timeout`.
pub async fn wait_until_settled<G: Gateway + 'static>(
    manager: &TokenManager<G>,
    kind: ActionKind,
    every: Duration,
    timeout: Duration,
) -> eyre::Result<()> {
    let settle = async {
        while manager.is_loading(kind).await {
            debug!(kind = %kind, "Still confirming.");
            time::sleep(every).await;
        }
    };

    time::timeout(timeout, settle)
        .await
        .map_err(|_| eyre::eyre!("{kind} not confirmed after {}s", timeout.as_secs()))
}

/// Plain-text rendering of a token session.
pub fn render_view(view: &TokenView, loading: &LoadingFlags) -> String {
    let mut lines = vec![
        view.symbol.clone(),
        format!("  balance:   {}", view.balance),
        format!("  approved:  {}", view.approved_amount),
    ];
    if !view.amount.is_empty() {
        lines.push(format!("  amount:    {}", view.amount));
    }

    let mut warnings = Vec::new();
    if view.has_invalid_amount {
        warnings.push("invalid amount");
    }
    if view.has_insufficient_balance {
        warnings.push("insufficient balance");
    }
    if view.has_insufficient_allowance {
        warnings.push("insufficient allowance");
    }
    if !warnings.is_empty() {
        lines.push(format!("  warnings:  {}", warnings.join(", ")));
    }

    let pending = [
        (ActionKind::Approve, view.pending_approve, loading.approve),
        (ActionKind::Transfer, view.pending_transfer, loading.transfer),
        (ActionKind::Mint, view.pending_mint, loading.mint),
    ];
    for (kind, tx_hash, confirming) in pending {
        if let Some(tx_hash) = tx_hash {
            let status = if confirming { "confirming" } else { "done" };
            lines.push(format!("  {:<10} {tx_hash} ({status})", format!("{kind}:")));
        }
    }

    if let Some(error) = &view.error {
        lines.push(format!("  error:     {error}"));
    }

    lines.join("\n")
}

pub fn render_portfolio(total: &PortfolioTotal) -> String {
    let mut out = format!("Total: {}", total.display);
    if !total.skipped.is_empty() {
        out.push_str(&format!(" (unavailable: {})", total.skipped.join(", ")));
    }
    out
}
