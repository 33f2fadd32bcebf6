use clap::{Arg, Command};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref CMD: Command<'static> = Command::new("ibc-link")
        .version("0.1.0")
        .about("Relays IBC packets between a pair of Cosmos-SDK chains")
        .subcommand_required(false)
        .subcommand(ics20_cmd())
        .subcommand(start_cmd());
}

fn registry_arg() -> Arg<'static> {
    Arg::new("registry")
        .long("registry")
        .takes_value(true)
        .default_value("registry.toml")
        .help("Path to the chain registry file")
}

fn app_arg() -> Arg<'static> {
    Arg::new("app")
        .long("app")
        .takes_value(true)
        .default_value("app.yaml")
        .help("Path to the app file naming the two chains and the mnemonic")
}

fn ics20_cmd() -> Command<'static> {
    Command::new("ics20")
        .about("Create clients, a connection and an ics20 channel, then record them in the app file")
        .arg(registry_arg())
        .arg(app_arg())
}

fn start_cmd() -> Command<'static> {
    Command::new("start")
        .about("Relay packets and acks between the two chains in the app file")
        .arg(registry_arg())
        .arg(app_arg())
        .arg(
            Arg::new("poll")
                .long("poll")
                .takes_value(true)
                .default_value("6")
                .help("Seconds between relay iterations"),
        )
        .arg(
            Arg::new("max-age")
                .long("max-age")
                .takes_value(true)
                .default_value("300")
                .help("Maximum client age in seconds before an idle update is submitted"),
        )
}
