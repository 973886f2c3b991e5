use secrecy::SecretString;

/// Runtime configuration for the outbound notification channel.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub notify_url: Option<String>,
    pub notify_token: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(notify_url: Option<String>, notify_token: Option<SecretString>) -> Self {
        Self {
            notify_url,
            notify_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            Some("https://hooks.example.com/printdesk".to_string()),
            Some(SecretString::from("hunter2".to_string())),
        );

        assert_eq!(
            args.notify_url.as_deref(),
            Some("https://hooks.example.com/printdesk")
        );
        assert_eq!(
            args.notify_token.as_ref().map(ExposeSecret::expose_secret),
            Some("hunter2")
        );
        // The token must stay out of debug output.
        assert!(!format!("{args:?}").contains("hunter2"));
    }
}
