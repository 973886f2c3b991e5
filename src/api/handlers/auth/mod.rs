//! Login flow: password check, trusted-device bypass, one-time codes.
//!
//! The flow is split like the rest of the handlers: leaf state
//! (`codes`, `allowlist`, `credentials`) underneath, request types beside
//! them, and one module per endpoint on top. Pending codes live only in
//! process memory; a restart invalidates them, which is accepted for this
//! deployment.

pub(crate) mod allowlist;
pub(crate) mod codes;
pub(crate) mod credentials;
pub mod login;
mod state;
pub(crate) mod types;
pub mod verify;

pub use allowlist::DeviceAllowlist;
pub use codes::{CodeTable, VerifyError};
pub use credentials::{CredentialError, CredentialStore, SEED_PASSWORD};
pub use state::{AuthConfig, AuthState};
