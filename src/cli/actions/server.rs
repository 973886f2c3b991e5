use crate::api::{
    self,
    handlers::auth::{AuthConfig, AuthState, CredentialStore, DeviceAllowlist},
    notify,
};
use crate::cli::globals::GlobalArgs;
use crate::store::FileStore;
use anyhow::Result;
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub notify_url: Option<String>,
    pub notify_token: Option<SecretString>,
    pub trusted_prefixes: Vec<String>,
    pub code_ttl_seconds: u64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the notification sink cannot be built or the server
/// fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let globals = GlobalArgs::new(args.notify_url.clone(), args.notify_token.clone());
    let notifier = notify::from_globals(&globals)?;

    let store = FileStore::new(&args.data_dir);
    let auth = Arc::new(AuthState::new(
        AuthConfig::new().with_code_ttl_seconds(args.code_ttl_seconds),
        DeviceAllowlist::new(args.trusted_prefixes.clone()),
        CredentialStore::new(store.clone()),
    ));

    api::new(args.port, &args.assets_dir, store, auth, notifier).await
}

fn log_startup_args(args: &Args) {
    info!(
        port = args.port,
        data_dir = %args.data_dir.display(),
        assets_dir = %args.assets_dir.display(),
        notify_url = args.notify_url.as_deref().unwrap_or("none"),
        notify_token_set = args.notify_token.is_some(),
        trusted_prefixes = args.trusted_prefixes.len(),
        code_ttl_seconds = args.code_ttl_seconds,
        "Startup configuration"
    );
}
