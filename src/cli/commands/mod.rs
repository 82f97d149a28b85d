pub mod argon2;
pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PORT: &str = "port";
pub const ARG_ADDRESS: &str = "address";

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

    let command = Command::new("acceso")
        .about("User registration and authentication")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("3000")
                .env("ACCESO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_ADDRESS)
                .short('a')
                .long("address")
                .help("Address to bind, IPv4 or IPv6")
                .default_value("::")
                .env("ACCESO_ADDRESS")
                .value_parser(clap::value_parser!(std::net::IpAddr)),
        );

    let command = argon2::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    fn with_cleared_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        temp_env::with_vars(
            [
                ("ACCESO_PORT", None::<&str>),
                ("ACCESO_ADDRESS", None::<&str>),
                ("ACCESO_LOG_LEVEL", None::<&str>),
            ],
            f,
        )
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "acceso");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("User registration and authentication".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() -> Result<(), clap::Error> {
        with_cleared_env(|| {
            let matches = new().try_get_matches_from(vec!["acceso"])?;
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(3000));
            assert_eq!(
                matches.get_one::<IpAddr>(ARG_ADDRESS).copied(),
                Some(IpAddr::V6(Ipv6Addr::UNSPECIFIED))
            );
            assert_eq!(
                matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                Some(0)
            );
            Ok(())
        })
    }

    #[test]
    fn test_check_port_and_address() -> Result<(), clap::Error> {
        with_cleared_env(|| {
            let matches = new().try_get_matches_from(vec![
                "acceso",
                "--port",
                "8080",
                "--address",
                "127.0.0.1",
            ])?;
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
            assert_eq!(
                matches.get_one::<IpAddr>(ARG_ADDRESS).copied(),
                Some(IpAddr::V4(Ipv4Addr::LOCALHOST))
            );
            Ok(())
        })
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("ACCESO_PORT", Some("443")),
                ("ACCESO_ADDRESS", Some("0.0.0.0")),
                ("ACCESO_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["acceso"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<IpAddr>(ARG_ADDRESS).copied(),
                    Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("ACCESO_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["acceso"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("ACCESO_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["acceso".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_invalid_values_fail() {
        with_cleared_env(|| {
            let result = new().try_get_matches_from(vec!["acceso", "--port", "70000"]);
            assert_eq!(
                result.map_err(|e| e.kind()).err(),
                Some(clap::error::ErrorKind::ValueValidation)
            );

            let result = new().try_get_matches_from(vec!["acceso", "--address", "localhost"]);
            assert_eq!(
                result.map_err(|e| e.kind()).err(),
                Some(clap::error::ErrorKind::ValueValidation)
            );
        });
    }
}
