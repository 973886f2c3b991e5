//! Trusted-device allowlist.

/// Static set of trusted device-identifier prefixes.
///
/// A device is trusted iff its identifier is non-empty and starts with one
/// of the configured prefixes. Trusted devices skip the one-time-code step
/// on login.
#[derive(Clone, Debug)]
pub struct DeviceAllowlist {
    prefixes: Vec<String>,
}

impl DeviceAllowlist {
    #[must_use]
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    #[must_use]
    pub fn contains(&self, device_id: &str) -> bool {
        !device_id.is_empty()
            && self
                .prefixes
                .iter()
                .any(|prefix| device_id.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist() -> DeviceAllowlist {
        DeviceAllowlist::new(vec!["7e4cf2".to_string(), "shop-".to_string()])
    }

    #[test]
    fn prefix_match_is_trusted() {
        assert!(allowlist().contains("7e4cf2aa01"));
        assert!(allowlist().contains("shop-kiosk"));
    }

    #[test]
    fn other_ids_are_not_trusted() {
        assert!(!allowlist().contains("aa017e4cf2"));
        assert!(!allowlist().contains("visitor"));
    }

    #[test]
    fn empty_id_is_never_trusted() {
        assert!(!allowlist().contains(""));
        // Even an empty prefix must not trust an empty id.
        assert!(!DeviceAllowlist::new(vec![String::new()]).contains(""));
    }
}
