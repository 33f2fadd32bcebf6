use anyhow::Result;
use clap::ArgMatches;
use log::info;
use relayer::link::Link;
use relayer::side::Side;
use std::str::FromStr;
use types::ibc_core::ics04_channel::channel::Ordering;
use types::ibc_core::ics24_host::identifier::{ConnectionId, PortId};

use crate::app::AppConfig;
use crate::registry::ChainRegistry;

pub const ICS20_VERSION: &str = "ics20-1";

/// Bootstrap the ics20 lane: reuse or create the connection pair, open a
/// transfer channel, and record the connection ids in the app file.
pub async fn run(matches: &ArgMatches) -> Result<()> {
    let registry_path = matches.value_of("registry").expect("has default");
    let app_path = matches.value_of("app").expect("has default");

    let registry = ChainRegistry::load(registry_path)?;
    let mut app = AppConfig::load(app_path)?;

    let src_entry = registry.entry(&app.src)?;
    let dest_entry = registry.entry(&app.dest)?;

    let chain_a = src_entry.to_chain(&app.mnemonic)?;
    let chain_b = dest_entry.to_chain(&app.mnemonic)?;

    let link = match (&app.src_connection, &app.dest_connection) {
        (Some(src_connection), Some(dest_connection)) => {
            Link::create_with_existing_connections(
                chain_a,
                chain_b,
                &ConnectionId::from_str(src_connection)?,
                &ConnectionId::from_str(dest_connection)?,
            )
            .await?
        }
        _ => Link::create_with_new_connections(chain_a, chain_b).await?,
    };

    app.src_connection = Some(link.end_a().connection_id.to_string());
    app.dest_connection = Some(link.end_b().connection_id.to_string());
    app.save(app_path)?;

    let src_port = PortId::from_str(&src_entry.ics20_port())?;
    let dest_port = PortId::from_str(&dest_entry.ics20_port())?;

    let channels = link
        .create_channel(Side::A, &src_port, &dest_port, Ordering::Unordered, ICS20_VERSION)
        .await?;

    info!("created channel: {channels:?}");
    println!(
        "Created channel:\n  {}: {} / {} ({})\n  {}: {} / {} ({})",
        app.src,
        channels.src.port_id,
        channels.src.channel_id,
        link.end_a().connection_id,
        app.dest,
        channels.dest.port_id,
        channels.dest.channel_id,
        link.end_b().connection_id,
    );

    Ok(())
}
