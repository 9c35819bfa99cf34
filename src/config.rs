//! Configuration management for prhandler.
//!
//! Settings are resolved from, in order of precedence:
//! - command line arguments
//! - environment variables (a `.env` file in the working directory is loaded
//!   into the environment first, without overriding variables already set)
//! - defaults
//!
//! ## Example
//!
//! ```rust
//! use clap::Parser;
//! use prhandler::{Args, Config};
//!
//! let args = Args::parse_from([
//!     "prhandler",
//!     "--approve",
//!     "https://dev.azure.com/org/proj/_git/repo/pullrequest/1",
//!     "my-pat",
//! ]);
//! let config = Config::resolve_with(&args, |_| None).unwrap();
//! assert!(config.pat.is_from_source("cli"));
//! ```

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::{ConfigError, PrHandlerResult, UsageError},
    logging::{LogConfig, LogFormat, LogLevel},
    models::{Args, OutputFormat},
    parsed_property::ParsedProperty,
};

/// Environment variable holding the personal access token.
pub const PAT_ENV_VAR: &str = "ADO_PAT";
/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV_VAR: &str = "PRHANDLER_LOG_LEVEL";
/// Environment variable selecting the log file.
pub const LOG_FILE_ENV_VAR: &str = "PRHANDLER_LOG_FILE";
/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV_VAR: &str = "PRHANDLER_LOG_FORMAT";

/// Settings resolved for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Personal access token used to authenticate.
    pub pat: ParsedProperty<SecretString>,
    /// Log level; logging is disabled when absent.
    pub log_level: Option<ParsedProperty<LogLevel>>,
    /// Log file; stderr when absent.
    pub log_file: Option<ParsedProperty<PathBuf>>,
    /// Log output format.
    pub log_format: ParsedProperty<LogFormat>,
    /// Result output format.
    pub output: ParsedProperty<OutputFormat>,
}

impl Config {
    /// Loads a `.env` file from the working directory, if there is one.
    ///
    /// Returns the path of the loaded file.
    pub fn load_dotenv() -> Option<PathBuf> {
        dotenvy::dotenv().ok()
    }

    /// Resolves configuration from arguments and the process environment.
    pub fn resolve(args: &Args) -> PrHandlerResult<Self> {
        Self::resolve_with(args, |name| std::env::var(name).ok())
    }

    /// Resolves configuration from arguments and an environment lookup.
    ///
    /// Empty values count as unset. A missing token is a usage error; an
    /// unrecognised log level or format is a configuration error.
    pub fn resolve_with<F>(args: &Args, env: F) -> PrHandlerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let pat = match &args.pat {
            Some(pat) if !pat.expose_secret().is_empty() => {
                ParsedProperty::Cli(pat.clone(), "PAT")
            }
            _ => env(PAT_ENV_VAR)
                .map(|v| ParsedProperty::Env(SecretString::from(v), PAT_ENV_VAR))
                .ok_or(UsageError::MissingToken)?,
        };

        let log_level = match (&args.log_level, env(LOG_LEVEL_ENV_VAR)) {
            (Some(cli), _) => Some(ParsedProperty::Cli(
                parse_setting(cli, "log-level", LogLevel::parse)?,
                "--log-level",
            )),
            (None, Some(value)) => Some(ParsedProperty::Env(
                parse_setting(&value, LOG_LEVEL_ENV_VAR, LogLevel::parse)?,
                LOG_LEVEL_ENV_VAR,
            )),
            (None, None) => None,
        };

        let log_file = match (&args.log_file, env(LOG_FILE_ENV_VAR)) {
            (Some(cli), _) => Some(ParsedProperty::Cli(cli.clone(), "--log-file")),
            (None, Some(value)) => Some(ParsedProperty::Env(PathBuf::from(value), LOG_FILE_ENV_VAR)),
            (None, None) => None,
        };

        let log_format = match (&args.log_format, env(LOG_FORMAT_ENV_VAR)) {
            (Some(cli), _) => ParsedProperty::Cli(
                parse_setting(cli, "log-format", LogFormat::parse)?,
                "--log-format",
            ),
            (None, Some(value)) => ParsedProperty::Env(
                parse_setting(&value, LOG_FORMAT_ENV_VAR, LogFormat::parse)?,
                LOG_FORMAT_ENV_VAR,
            ),
            (None, None) => ParsedProperty::Default(LogFormat::default()),
        };

        let output = match args.output {
            Some(format) => ParsedProperty::Cli(format, "--output"),
            None => ParsedProperty::Default(OutputFormat::default()),
        };

        Ok(Self {
            pat,
            log_level,
            log_file,
            log_format,
            output,
        })
    }

    /// Logging settings for [`crate::logging::init_logging`].
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.as_ref().map(|level| *level.value()),
            file: self.log_file.as_ref().map(|file| file.value().clone()),
            format: *self.log_format.value(),
        }
    }
}

fn parse_setting<T>(
    value: &str,
    field: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    parse(value).ok_or_else(|| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("unrecognised value '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrHandlerError;
    use clap::Parser;
    use std::collections::HashMap;

    const URL: &str = "https://dev.azure.com/org/proj/_git/repo/pullrequest/1";

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["prhandler", "--approve", URL];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    /// # Token Precedence
    ///
    /// Verifies the positional token wins over ADO_PAT.
    ///
    /// ## Test Scenario
    /// - Resolves with both a CLI token and ADO_PAT set
    ///
    /// ## Expected Outcome
    /// - The CLI token is used and recorded as coming from the CLI
    #[test]
    fn test_cli_token_takes_precedence() {
        let config =
            Config::resolve_with(&args(&["cli-pat"]), env_from(&[("ADO_PAT", "env-pat")])).unwrap();

        assert!(config.pat.is_from_source("cli"));
        assert_eq!(config.pat.expose_secret(), "cli-pat");
    }

    /// # Token From Environment
    ///
    /// Verifies ADO_PAT is used when no token argument is given.
    ///
    /// ## Test Scenario
    /// - Resolves without a CLI token and with ADO_PAT set
    ///
    /// ## Expected Outcome
    /// - The environment token is used and its origin is ADO_PAT
    #[test]
    fn test_env_token_fallback() {
        let config = Config::resolve_with(&args(&[]), env_from(&[("ADO_PAT", "env-pat")])).unwrap();

        assert_eq!(config.pat.origin(), Some("ADO_PAT"));
        assert_eq!(config.pat.expose_secret(), "env-pat");
    }

    /// # Missing Token
    ///
    /// Verifies that a missing or empty token is a usage error.
    ///
    /// ## Test Scenario
    /// - Resolves with no token anywhere
    /// - Resolves with an empty ADO_PAT and an empty CLI token
    ///
    /// ## Expected Outcome
    /// - Both fail with UsageError::MissingToken
    #[test]
    fn test_missing_token_is_usage_error() {
        let err = Config::resolve_with(&args(&[]), |_| None).unwrap_err();
        assert!(matches!(
            err,
            PrHandlerError::Usage(UsageError::MissingToken)
        ));

        let err = Config::resolve_with(&args(&[""]), env_from(&[("ADO_PAT", "  ")])).unwrap_err();
        assert!(matches!(
            err,
            PrHandlerError::Usage(UsageError::MissingToken)
        ));
    }

    /// # Logging Settings
    ///
    /// Verifies logging settings resolve from CLI over environment.
    ///
    /// ## Test Scenario
    /// - CLI sets the level, environment sets level, file and format
    ///
    /// ## Expected Outcome
    /// - Level comes from the CLI; file and format from the environment
    #[test]
    fn test_logging_settings_resolution() {
        let config = Config::resolve_with(
            &args(&["pat", "--log-level", "debug"]),
            env_from(&[
                (LOG_LEVEL_ENV_VAR, "error"),
                (LOG_FILE_ENV_VAR, "/tmp/prhandler.log"),
                (LOG_FORMAT_ENV_VAR, "json"),
            ]),
        )
        .unwrap();

        let log = config.log_config();
        assert_eq!(log.level, Some(LogLevel::Debug));
        assert_eq!(log.file, Some(PathBuf::from("/tmp/prhandler.log")));
        assert_eq!(log.format, LogFormat::Json);
        assert!(config.log_format.is_from_source("env"));
    }

    /// # Logging Disabled by Default
    ///
    /// Verifies that no logging settings means logging stays off.
    ///
    /// ## Test Scenario
    /// - Resolves with only a token
    ///
    /// ## Expected Outcome
    /// - No level, no file, default text format
    #[test]
    fn test_logging_defaults() {
        let config = Config::resolve_with(&args(&["pat"]), |_| None).unwrap();

        assert_eq!(config.log_config(), LogConfig::default());
        assert!(config.log_format.is_from_source("default"));
        assert_eq!(*config.output, OutputFormat::Text);

        let config = Config::resolve_with(&args(&["pat", "--output", "json"]), |_| None).unwrap();
        assert_eq!(*config.output, OutputFormat::Json);
        assert!(config.output.is_from_source("cli"));
    }

    /// # Invalid Logging Settings
    ///
    /// Verifies that unrecognised logging values are configuration errors.
    ///
    /// ## Test Scenario
    /// - Resolves with an invalid CLI log level and an invalid env log format
    ///
    /// ## Expected Outcome
    /// - Both fail with ConfigError::InvalidValue naming the setting
    #[test]
    fn test_invalid_logging_settings() {
        let err = Config::resolve_with(&args(&["pat", "--log-level", "loud"]), |_| None)
            .unwrap_err();
        match err {
            PrHandlerError::Config(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "log-level")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Config::resolve_with(
            &args(&["pat"]),
            env_from(&[(LOG_FORMAT_ENV_VAR, "xml")]),
        )
        .unwrap_err();
        assert!(matches!(err, PrHandlerError::Config(_)));
    }
}
