use crate::cli::actions::{server::Args, Action};
use crate::site::handlers::AuthProviders;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let maintenance_var = matches
        .get_one::<String>("maintenance-var")
        .cloned()
        .context("missing required argument: --maintenance-var")?;

    let assets_dir = matches.get_one::<String>("assets-dir").map(PathBuf::from);

    let auth_providers = matches
        .get_one::<String>("auth-providers")
        .map(|list| AuthProviders::parse(list))
        .unwrap_or_default();

    Ok(Action::Server(Args {
        port,
        maintenance_var,
        assets_dir,
        auth_providers,
    }))
}
