use crate::credentials::HashParams;
use clap::{Arg, ArgMatches, Command};

pub const ARG_ARGON2_MEMORY_KIB: &str = "argon2-memory-kib";
pub const ARG_ARGON2_ITERATIONS: &str = "argon2-iterations";
pub const ARG_ARGON2_PARALLELISM: &str = "argon2-parallelism";

// argon2 0.5 defaults (OWASP recommended Argon2id costs)
const DEFAULT_MEMORY_KIB: &str = "19456";
const DEFAULT_ITERATIONS: &str = "2";
const DEFAULT_PARALLELISM: &str = "1";

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Options {
    /// Parse Argon2 cost arguments from matches.
    ///
    /// # Errors
    /// Returns an error if an argument is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let read = |id: &str| -> anyhow::Result<u32> {
            matches
                .get_one::<u32>(id)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };

        Ok(Self {
            memory_kib: read(ARG_ARGON2_MEMORY_KIB)?,
            iterations: read(ARG_ARGON2_ITERATIONS)?,
            parallelism: read(ARG_ARGON2_PARALLELISM)?,
        })
    }
}

impl From<Options> for HashParams {
    fn from(opts: Options) -> Self {
        Self {
            memory_kib: opts.memory_kib,
            iterations: opts.iterations,
            parallelism: opts.parallelism,
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ARGON2_MEMORY_KIB)
                .long(ARG_ARGON2_MEMORY_KIB)
                .help("Argon2id memory cost in KiB")
                .default_value(DEFAULT_MEMORY_KIB)
                .env("ACCESO_ARGON2_MEMORY_KIB")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_ARGON2_ITERATIONS)
                .long(ARG_ARGON2_ITERATIONS)
                .help("Argon2id number of iterations")
                .default_value(DEFAULT_ITERATIONS)
                .env("ACCESO_ARGON2_ITERATIONS")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_ARGON2_PARALLELISM)
                .long(ARG_ARGON2_PARALLELISM)
                .help("Argon2id degree of parallelism")
                .default_value(DEFAULT_PARALLELISM)
                .env("ACCESO_ARGON2_PARALLELISM")
                .value_parser(clap::value_parser!(u32)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_argon2_defaults() -> anyhow::Result<()> {
        temp_env::with_vars(
            [
                ("ACCESO_ARGON2_MEMORY_KIB", None::<&str>),
                ("ACCESO_ARGON2_ITERATIONS", None::<&str>),
                ("ACCESO_ARGON2_PARALLELISM", None::<&str>),
            ],
            || {
                let matches =
                    with_args(Command::new("acceso")).try_get_matches_from(vec!["acceso"])?;
                assert_eq!(
                    HashParams::from(Options::parse(&matches)?),
                    HashParams::default()
                );
                Ok(())
            },
        )
    }

    #[test]
    fn reads_costs_from_env() -> anyhow::Result<()> {
        temp_env::with_vars(
            [
                ("ACCESO_ARGON2_MEMORY_KIB", Some("65536")),
                ("ACCESO_ARGON2_ITERATIONS", Some("3")),
                ("ACCESO_ARGON2_PARALLELISM", Some("4")),
            ],
            || {
                let matches =
                    with_args(Command::new("acceso")).try_get_matches_from(vec!["acceso"])?;
                let opts = Options::parse(&matches)?;
                assert_eq!(opts.memory_kib, 65536);
                assert_eq!(opts.iterations, 3);
                assert_eq!(opts.parallelism, 4);
                Ok(())
            },
        )
    }
}
