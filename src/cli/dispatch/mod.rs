use crate::cli::actions::{server, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let data_dir = matches
        .get_one::<String>("data-dir")
        .cloned()
        .context("missing required argument: --data-dir")?;

    let assets_dir = matches
        .get_one::<String>("assets-dir")
        .cloned()
        .context("missing required argument: --assets-dir")?;

    Ok(Action::Server(server::Args {
        port,
        data_dir: PathBuf::from(data_dir),
        assets_dir: PathBuf::from(assets_dir),
        notify_url: matches.get_one::<String>("notify-url").cloned(),
        notify_token: matches
            .get_one::<String>("notify-token")
            .cloned()
            .map(SecretString::from),
        trusted_prefixes: matches
            .get_many::<String>("trusted-device-prefix")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        code_ttl_seconds: matches
            .get_one::<u64>("code-ttl-seconds")
            .copied()
            .unwrap_or(3600),
    }))
}
