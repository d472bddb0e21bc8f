//! Prometheus metrics for the dashboard.

use metrics::{counter, describe_counter, describe_gauge, gauge};
use session::PortfolioTotal;
use token::ActionKind;

/// Aggregated metrics for the dashboard.
///
/// Descriptions are registered with the global registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "dashboard_submissions_total",
            "Transactions accepted by the wallet, by action kind"
        );
        describe_counter!(
            "dashboard_failures_total",
            "Transactions rejected or failed on submission, by action kind"
        );
        describe_counter!(
            "dashboard_skipped_total",
            "Actions not submitted because a precondition was missing"
        );

        describe_gauge!(
            "dashboard_token_balance",
            "Last seen balance of the connected account, by token"
        );
        describe_gauge!(
            "dashboard_token_allowance",
            "Last seen self-allowance of the connected account, by token"
        );
        describe_gauge!(
            "dashboard_portfolio_total",
            "Sum of the connected account's balances across all tokens"
        );
    }

    pub fn record_submission(&self, kind: ActionKind) {
        counter!("dashboard_submissions_total", "kind" => kind.as_str()).increment(1);
    }

    pub fn record_failure(&self, kind: ActionKind) {
        counter!("dashboard_failures_total", "kind" => kind.as_str()).increment(1);
    }

    pub fn record_skipped(&self, kind: ActionKind) {
        counter!("dashboard_skipped_total", "kind" => kind.as_str()).increment(1);
    }

    /// Set the balance gauge from a rendered decimal value.
    pub fn set_balance(&self, symbol: &str, display: &str) {
        gauge!("dashboard_token_balance", "token" => symbol.to_string())
            .set(display.parse::<f64>().unwrap_or_default());
    }

    pub fn set_allowance(&self, symbol: &str, display: &str) {
        gauge!("dashboard_token_allowance", "token" => symbol.to_string())
            .set(display.parse::<f64>().unwrap_or_default());
    }

    pub fn set_portfolio_total(&self, total: &PortfolioTotal) {
        gauge!("dashboard_portfolio_total").set(total.display.parse::<f64>().unwrap_or_default());
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
