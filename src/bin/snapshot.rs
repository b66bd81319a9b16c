//! Binary that fetches a live snapshot for one currency and prints the
//! analytics reports as JSON.
//!
//! # Usage
//!
//! ```sh
//! export DERIBIT_ENV="prod"          # or "test"
//! export DERIBIT_CURRENCY="BTC"      # BTC or ETH
//! export DERIBIT_EXPIRY="28JUN24"    # optional: per-expiry reports
//! cargo run --bin snapshot --features cli
//! ```

use std::env;

use deribit_analytics::DeribitClient;
use deribit_analytics::types::{Currency, Environment, InstrumentKind, IvSource};
use serde::Serialize;

/// Print a report, or the error code and message when it failed.
fn emit<T: Serialize>(name: &str, result: deribit_analytics::Result<T>) {
    let value = match result {
        Ok(report) => serde_json::to_value(report),
        Err(err) => {
            tracing::warn!(report = name, error = %err, "report failed");
            Ok(serde_json::json!({ "error": err.code(), "message": err.short_message() }))
        }
    };

    match value.and_then(|v| serde_json::to_string_pretty(&v)) {
        Ok(json) => println!("== {name}\n{json}"),
        Err(err) => eprintln!("== {name}: could not serialize report: {err}"),
    }
}

#[tokio::main]
async fn main() -> deribit_analytics::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let environment: Environment = env::var("DERIBIT_ENV")
        .unwrap_or_else(|_| "prod".to_owned())
        .parse()?;
    let currency: Currency = env::var("DERIBIT_CURRENCY")
        .unwrap_or_else(|_| "BTC".to_owned())
        .parse()?;
    let expiry = env::var("DERIBIT_EXPIRY").ok();

    let client = DeribitClient::new(environment)?;
    tracing::info!(?environment, %currency, base_url = client.base_url(), "fetching snapshot");

    let status = client.status().await;
    emit("status", Ok(&status));
    if !status.api_ok {
        return Ok(());
    }

    emit("dvol", client.dvol_snapshot(currency).await);
    emit(
        "expected_move_1h",
        client.expected_move_iv(currency, 60, IvSource::Dvol).await,
    );
    emit("iv_term_structure", client.iv_term_structure(currency, &[]).await);
    emit("skew", client.skew_metrics(currency, &[]).await);
    emit("surface", client.surface_snapshot(currency, &[]).await);
    emit("gamma_exposure", client.gamma_exposure(currency, &[]).await);

    if let Some(expiry) = expiry {
        emit("option_chain", client.option_chain(currency, &expiry).await);
        emit(
            "open_interest",
            client.open_interest_by_strike(currency, &expiry).await,
        );
        emit("max_pain", client.max_pain(currency, &expiry).await);
    }

    emit(
        "futures",
        client
            .instruments_summary(currency, InstrumentKind::Future, false)
            .await,
    );
    emit("funding", client.funding_snapshot(currency).await);
    emit(
        "order_book",
        client
            .order_book_summary(&currency.perpetual_instrument(), 20)
            .await,
    );

    Ok(())
}
