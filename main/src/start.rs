use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use log::{info, warn};
use relayer::error::Error as RelayerError;
use relayer::link::Link;
use relayer::relayed_heights::RelayedHeights;
use relayer::side::Side;
use types::ibc_core::ics24_host::identifier::ConnectionId;

use crate::app::AppConfig;
use crate::registry::ChainRegistry;

/// The steady-state loop: one relay iteration per poll interval, plus idle
/// client updates when a client would otherwise age out.
pub async fn run(matches: &ArgMatches) -> Result<()> {
    let registry_path = matches.value_of("registry").expect("has default");
    let app_path = matches.value_of("app").expect("has default");
    let poll_interval = Duration::from_secs(matches.value_of("poll").expect("has default").parse()?);
    let max_client_age =
        Duration::from_secs(matches.value_of("max-age").expect("has default").parse()?);

    let registry = ChainRegistry::load(registry_path)?;
    let app = AppConfig::load(app_path)?;

    let (Some(src_connection), Some(dest_connection)) =
        (&app.src_connection, &app.dest_connection)
    else {
        return Err(anyhow!(
            "the app file has no connections yet, run the ics20 command first"
        ));
    };

    let chain_a = registry.entry(&app.src)?.to_chain(&app.mnemonic)?;
    let chain_b = registry.entry(&app.dest)?.to_chain(&app.mnemonic)?;

    let link = Link::create_with_existing_connections(
        chain_a,
        chain_b,
        &ConnectionId::from_str(src_connection)?,
        &ConnectionId::from_str(dest_connection)?,
    )
    .await?;

    info!("relaying on {link}, polling every {poll_interval:?}");

    let mut cursor = RelayedHeights::default();

    loop {
        tokio::select! {
            result = relay_once(&link, cursor, max_client_age) => {
                match result {
                    Ok(next_cursor) => cursor = next_cursor,
                    // The cursor from the last success bounds the re-work on
                    // the next pass.
                    Err(e) => warn!("relay iteration failed: {e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                return Err(RelayerError::cancelled().into());
            }
        }

        tokio::time::sleep(poll_interval).await;
    }
}

async fn relay_once(
    link: &Link,
    cursor: RelayedHeights,
    max_client_age: Duration,
) -> Result<RelayedHeights, RelayerError> {
    let next_cursor = link.check_and_relay_packets_and_acks(cursor).await?;

    if let Some(height) = link.update_client_if_stale(Side::A, max_client_age).await? {
        info!("refreshed client of A on B to height {height}");
    }
    if let Some(height) = link.update_client_if_stale(Side::B, max_client_age).await? {
        info!("refreshed client of B on A to height {height}");
    }

    Ok(next_cursor)
}
