//! HTTP handlers, one module per resource.

pub mod auth;
pub mod filaments;
pub mod health;
pub mod orders;
pub mod passwords;

use serde_json::{Map, Value};

/// Pull a non-empty string field out of a request body, leaving everything
/// else in place. Non-string or blank values are dropped so the typed
/// defaults win.
pub(crate) fn take_string(body: &mut Map<String, Value>, key: &str) -> Option<String> {
    match body.remove(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

pub(crate) fn take_bool(body: &mut Map<String, Value>, key: &str) -> Option<bool> {
    match body.remove(key) {
        Some(Value::Bool(b)) => Some(b),
        _ => None,
    }
}
