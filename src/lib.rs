//! # Printdesk
//!
//! `printdesk` is the backend for a small 3D-printing service: it keeps
//! print orders, the filament inventory, and the admin credential set in
//! flat JSON documents on disk and exposes them over HTTP.
//!
//! The only stateful flow is admin login: a password check followed, for
//! unknown devices, by a one-time 6-digit code delivered out-of-band and
//! verified within a fixed window. Devices whose identifier starts with a
//! trusted prefix skip the second factor entirely.
//!
//! ## Persistence
//!
//! Every collection is a single JSON document (`orders.json`,
//! `filaments.json`, `passwords.json`) rewritten whole on change. Missing or
//! corrupt documents fall back to seeded defaults. This deliberately targets
//! a single-process deployment; last writer wins.

pub mod api;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
