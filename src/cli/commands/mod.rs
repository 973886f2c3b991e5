use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    Command::new("printdesk")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PRINTDESK_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .help("Directory holding the JSON documents")
                .default_value("data")
                .env("PRINTDESK_DATA_DIR"),
        )
        .arg(
            Arg::new("assets-dir")
                .long("assets-dir")
                .help("Directory with the single-page app served as fallback")
                .default_value("public")
                .env("PRINTDESK_ASSETS_DIR"),
        )
        .arg(
            Arg::new("notify-url")
                .long("notify-url")
                .help("Webhook URL for order and login-code notifications; logs locally when unset")
                .env("PRINTDESK_NOTIFY_URL"),
        )
        .arg(
            Arg::new("notify-token")
                .long("notify-token")
                .help("Bearer token for the notification webhook")
                .env("PRINTDESK_NOTIFY_TOKEN"),
        )
        .arg(
            Arg::new("trusted-device-prefix")
                .long("trusted-device-prefix")
                .help("Device-identifier prefix that skips the login code (repeatable)")
                .action(ArgAction::Append)
                .default_value("7e4cf2")
                .env("PRINTDESK_TRUSTED_DEVICE_PREFIX"),
        )
        .arg(
            Arg::new("code-ttl-seconds")
                .long("code-ttl-seconds")
                .help("How long an issued login code stays valid")
                .default_value("3600")
                .env("PRINTDESK_CODE_TTL")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PRINTDESK_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "printdesk");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        let matches = new().get_matches_from(vec!["printdesk"]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(
            matches.get_one::<String>("data-dir").map(String::as_str),
            Some("data")
        );
        assert_eq!(
            matches.get_one::<String>("assets-dir").map(String::as_str),
            Some("public")
        );
        assert_eq!(
            matches.get_one::<u64>("code-ttl-seconds").copied(),
            Some(3600)
        );
        assert_eq!(matches.get_one::<String>("notify-url"), None);
    }

    #[test]
    fn test_explicit_args() {
        let matches = new().get_matches_from(vec![
            "printdesk",
            "--port",
            "3000",
            "--data-dir",
            "/var/lib/printdesk",
            "--notify-url",
            "https://hooks.example.com/printdesk",
            "--trusted-device-prefix",
            "7e4cf2",
            "--trusted-device-prefix",
            "kiosk-",
        ]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(3000));
        assert_eq!(
            matches.get_one::<String>("data-dir").map(String::as_str),
            Some("/var/lib/printdesk")
        );

        let prefixes: Vec<&String> = matches
            .get_many::<String>("trusted-device-prefix")
            .expect("prefixes")
            .collect();
        assert_eq!(prefixes, ["7e4cf2", "kiosk-"]);
    }

    #[test]
    fn test_env_fallback() {
        temp_env::with_var("PRINTDESK_PORT", Some("9090"), || {
            let matches = new().get_matches_from(vec!["printdesk"]);
            assert_eq!(matches.get_one::<u16>("port").copied(), Some(9090));
        });
    }
}
