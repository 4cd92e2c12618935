use crate::{
    gate::{EnvFlag, FlagSource},
    site::{self, handlers::AuthProviders, SiteConfig},
};
use anyhow::Result;
use std::{path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub maintenance_var: String,
    pub assets_dir: Option<PathBuf>,
    pub auth_providers: AuthProviders,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let flag: Arc<dyn FlagSource> = Arc::new(EnvFlag::new(args.maintenance_var));

    if flag.flag().is_enabled() {
        info!("Maintenance mode is enabled at startup");
    }

    let config = SiteConfig {
        auth_providers: args.auth_providers,
        assets_dir: args.assets_dir,
    };

    let result = site::new(args.port, config, flag).await;

    crate::cli::telemetry::shutdown_tracer();

    result
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("maintenance_var", args.maintenance_var.clone()),
        (
            "assets_dir",
            args.assets_dir
                .as_ref()
                .map_or_else(|| "none".to_string(), |dir| dir.display().to_string()),
        ),
        ("auth_providers", args.auth_providers.providers.join(",")),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", frontgate_banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn frontgate_banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    FRONTGATE_BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

const FRONTGATE_BANNER: &str = r"
  _________
 |  _   _  |
 | | | | | |
 | | | | | |  F R O N T G A T E {VERSION}
 | |_| |_| |
 |_________|";
