//! In-memory one-time-code table keyed by device identifier.
//!
//! Records live for the table's TTL and are consumed on successful
//! verification. Nothing here is persisted: a process restart silently
//! invalidates every pending code, which is accepted behavior for this
//! deployment. Expiry is checked lazily at verification time; stale records
//! that are never verified stay in the map until overwritten.

use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("No code was requested for this device")]
    NoPendingCode,
    #[error("The code has expired, request a new one")]
    Expired,
    #[error("The code does not match")]
    Mismatch,
}

#[derive(Debug)]
struct PendingCode {
    code: u32,
    issued_at: Instant,
}

/// Pending verification codes, one per device identifier.
///
/// Issuing a new code for a device overwrites any prior record. The whole
/// table sits behind one mutex; contention is negligible at this request
/// volume.
#[derive(Debug)]
pub struct CodeTable {
    ttl: Duration,
    pending: Mutex<HashMap<String, PendingCode>>,
}

impl CodeTable {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Draw a fresh 6-digit code for `device_id` and store it, replacing any
    /// previous record for the same device.
    pub async fn issue(&self, device_id: &str) -> u32 {
        let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
        let mut pending = self.pending.lock().await;
        pending.insert(
            device_id.to_string(),
            PendingCode {
                code,
                issued_at: Instant::now(),
            },
        );
        code
    }

    /// Check `code` against the pending record for `device_id`.
    ///
    /// A correct match always consumes the record, so replaying the same
    /// code fails with [`VerifyError::NoPendingCode`]. An expired record is
    /// dropped regardless of code correctness. A mismatch keeps the record
    /// so the caller may retry before expiry.
    pub async fn verify(&self, device_id: &str, code: &str) -> Result<(), VerifyError> {
        let mut pending = self.pending.lock().await;

        let Some(record) = pending.get(device_id) else {
            return Err(VerifyError::NoPendingCode);
        };

        if record.issued_at.elapsed() > self.ttl {
            pending.remove(device_id);
            return Err(VerifyError::Expired);
        }

        if code.trim().parse::<u32>().map_or(true, |c| c != record.code) {
            return Err(VerifyError::Mismatch);
        }

        pending.remove(device_id);
        Ok(())
    }
}
