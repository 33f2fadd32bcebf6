use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod app;
mod ics20;
mod registry;
mod rootcmd;
mod start;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cmd = rootcmd::CMD.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("ics20", sub_matches)) => ics20::run(sub_matches).await,
        Some(("start", sub_matches)) => start::run(sub_matches).await,
        _ => {
            rootcmd::CMD.clone().print_help()?;
            Ok(())
        }
    }
}
