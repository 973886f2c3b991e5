//! Auth configuration and shared state.

use std::time::Duration;

use super::allowlist::DeviceAllowlist;
use super::codes::CodeTable;
use super::credentials::CredentialStore;

const DEFAULT_CODE_TTL_SECONDS: u64 = 60 * 60;

#[derive(Clone, Copy, Debug)]
pub struct AuthConfig {
    code_ttl_seconds: u64,
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_code_ttl_seconds(mut self, seconds: u64) -> Self {
        self.code_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn code_ttl(&self) -> Duration {
        Duration::from_secs(self.code_ttl_seconds)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the login flow needs, injected into handlers as one
/// `Extension<Arc<AuthState>>`. Owns the pending-code table so its lifetime
/// is tied to the process, and constructed per test instance for isolation.
pub struct AuthState {
    config: AuthConfig,
    codes: CodeTable,
    allowlist: DeviceAllowlist,
    credentials: CredentialStore,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, allowlist: DeviceAllowlist, credentials: CredentialStore) -> Self {
        let codes = CodeTable::new(config.code_ttl());
        Self {
            config,
            codes,
            allowlist,
            credentials,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    #[must_use]
    pub fn allowlist(&self) -> &DeviceAllowlist {
        &self.allowlist
    }

    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileStore;

    #[test]
    fn config_defaults_and_overrides() {
        let config = AuthConfig::new();
        assert_eq!(config.code_ttl(), Duration::from_secs(3600));

        let config = config.with_code_ttl_seconds(120);
        assert_eq!(config.code_ttl(), Duration::from_secs(120));
    }

    #[tokio::test]
    async fn state_wires_the_code_ttl_through() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = AuthState::new(
            AuthConfig::new().with_code_ttl_seconds(0),
            DeviceAllowlist::new(vec!["7e4cf2".to_string()]),
            CredentialStore::new(FileStore::new(dir.path())),
        );

        let code = state.codes().issue("printer-a").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(state
            .codes()
            .verify("printer-a", &code.to_string())
            .await
            .is_err());
    }
}
