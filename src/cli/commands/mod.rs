mod logging;

use crate::gate::flag::DEFAULT_MAINTENANCE_VAR;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("frontgate")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("FRONTGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("maintenance-var")
                .long("maintenance-var")
                .help("Environment variable holding the maintenance flag")
                .long_help(
                    "Environment variable holding the maintenance flag. It is read on every request; only the exact value \"true\" enables maintenance mode.",
                )
                .default_value(DEFAULT_MAINTENANCE_VAR)
                .env("FRONTGATE_MAINTENANCE_VAR"),
        )
        .arg(
            Arg::new("assets-dir")
                .long("assets-dir")
                .help("Directory served under /_internal/static")
                .env("FRONTGATE_ASSETS_DIR"),
        )
        .arg(
            Arg::new("auth-providers")
                .long("auth-providers")
                .help("Comma separated identity providers offered on sign-in")
                .default_value("google")
                .env("FRONTGATE_AUTH_PROVIDERS"),
        );

    logging::with_args(command)
}
