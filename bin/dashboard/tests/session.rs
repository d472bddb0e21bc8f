//! End-to-end session flows against the in-memory ledger.


use action::Outcome;
use alloy_primitives::U256;
use config::SessionConfig;
use dashboard::{render_view, submit, wait_until_settled, StatusReport};
use setup::{dai, memory_session, ACCOUNT, TARGET};
use std::time::Duration;
use token::ActionKind;

fn dai_units(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18))
}

#[tokio::test(start_paused = true)]
async fn test_mint_approve_transfer_flow() {
    let (ledger, manager) = memory_session(dai(), SessionConfig::default());

    let Outcome::Pending(mint) = submit(&manager, ActionKind::Mint).await else {
        panic!("mint should be submitted");
    };
    ledger.confirm(mint);
    manager.refresh().await;
    assert_eq!(manager.balance(), "100");

    manager.set_amount("25.5");
    assert!(manager.has_insufficient_allowance());
    assert!(matches!(
        submit(&manager, ActionKind::Approve).await,
        Outcome::Pending(_)
    ));
    manager.refresh().await;
    assert_eq!(manager.approved_amount(), "25.5");
    assert!(!manager.has_insufficient_allowance());

    assert!(matches!(
        submit(&manager, ActionKind::Transfer).await,
        Outcome::Pending(_)
    ));
    manager.refresh().await;
    assert_eq!(manager.balance(), "74.5");
    assert_eq!(
        ledger.balance_of(dai().address, TARGET),
        U256::from(255u64) * U256::from(10u64).pow(U256::from(17))
    );
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_settled_returns_after_confirmation() {
    let (ledger, manager) = memory_session(dai(), SessionConfig::default());
    let Outcome::Pending(tx_hash) = submit(&manager, ActionKind::Mint).await else {
        panic!("mint should be submitted");
    };

    let confirmer = {
        let ledger = ledger.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(12)).await;
            ledger.confirm(tx_hash);
        })
    };

    wait_until_settled(
        &manager,
        ActionKind::Mint,
        Duration::from_secs(5),
        Duration::from_secs(60),
    )
    .await
    .unwrap();
    assert!(!manager.is_mint_loading().await);
    confirmer.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_settled_times_out() {
    let (_ledger, manager) = memory_session(dai(), SessionConfig::default());
    submit(&manager, ActionKind::Mint).await;

    let result = wait_until_settled(
        &manager,
        ActionKind::Mint,
        Duration::from_secs(5),
        Duration::from_secs(20),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_rejected_write_surfaces_message() {
    let (ledger, manager) = memory_session(dai(), SessionConfig::default());
    ledger.fail_writes(true);
    manager.set_amount("1");

    let Outcome::Failed(err) = submit(&manager, ActionKind::Approve).await else {
        panic!("approve should fail");
    };
    assert_eq!(
        err.user_message().as_deref(),
        Some("Approve failed. Please try again.")
    );

    let report = StatusReport::collect(&manager).await;
    let rendered = render_view(&report.view, &report.loading);
    assert!(rendered.contains("error:     Approve failed. Please try again."));
}

#[tokio::test(start_paused = true)]
async fn test_status_report_json_shape() {
    let (ledger, manager) = memory_session(dai(), SessionConfig::default());
    ledger.set_balance(dai().address, ACCOUNT, dai_units(100));
    ledger.set_allowance(dai().address, ACCOUNT, ACCOUNT, dai_units(50));
    manager.refresh().await;
    manager.set_amount("60");

    let report = StatusReport::collect(&manager).await;
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["symbol"], "DAI");
    assert_eq!(json["balance"], "100");
    assert_eq!(json["approved_amount"], "50");
    assert_eq!(json["has_insufficient_balance"], false);
    assert_eq!(json["has_insufficient_allowance"], true);
    assert_eq!(json["loading"]["mint"], false);

    let rendered = render_view(&report.view, &report.loading);
    assert!(rendered.contains("warnings:  insufficient allowance"));
}

#[tokio::test(start_paused = true)]
async fn test_custom_mint_amount() {
    let config = SessionConfig {
        mint_amount_whole: 7,
        ..Default::default()
    };
    let (ledger, manager) = memory_session(dai(), config);
    submit(&manager, ActionKind::Mint).await;
    manager.refresh().await;

    assert_eq!(manager.balance(), "7");
    assert_eq!(ledger.balance_of(dai().address, ACCOUNT), dai_units(7));
}
