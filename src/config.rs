//! Runtime settings resolved from CLI flags and environment variables.
//!
//! Flags win; each required value falls back to an environment variable so
//! secrets can come from the environment (or a `.env` file) instead of the
//! command line.

use std::env;
use std::path::PathBuf;

use clap::Parser;

use crate::auth::secure::SecureString;
use crate::error::ConfigError;

/// Directory API base; the assignment endpoints live under /beta.
const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/beta";

/// Azure AD authority hosting the token endpoint.
const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";

/// Reconcile an enterprise application's role assignments against a desired group list.
#[derive(Parser)]
#[command(name = "aadsync", version, about)]
pub struct Cli {
    /// Enterprise Application Name (display-name prefix)
    #[arg(long = "app_name")]
    pub app_name: Option<String>,

    /// Azure Tenant Id
    #[arg(long = "tenant_id")]
    pub tenant_id: Option<String>,

    /// Deployment SPN Id
    #[arg(long = "spn_id")]
    pub spn_id: Option<String>,

    /// Deployment SPN Secret Key
    #[arg(long = "spn_key")]
    pub spn_key: Option<String>,

    /// JSON file containing all groups
    #[arg(long = "json_file_name", default_value = ".aad_state.json")]
    pub json_file_name: PathBuf,

    /// Verbose logs
    #[arg(long)]
    pub verbose: bool,
}

/// Validated runtime settings.
#[derive(Debug)]
pub struct Settings {
    pub app_name: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: SecureString,
    pub state_file: PathBuf,
    pub graph_base_url: String,
    pub authority_url: String,
}

impl Settings {
    /// Resolve settings from parsed flags with environment fallbacks.
    pub fn resolve(cli: Cli) -> Result<Self, ConfigError> {
        let app_name = require(cli.app_name, "AADSYNC_APP_NAME", "--app_name")?;
        let tenant_id = require(cli.tenant_id, "AZURE_TENANT_ID", "--tenant_id")?;
        let client_id = require(cli.spn_id, "AZURE_CLIENT_ID", "--spn_id")?;
        let client_secret = require(cli.spn_key, "AZURE_CLIENT_SECRET", "--spn_key")?.into();

        Ok(Self {
            app_name,
            tenant_id,
            client_id,
            client_secret,
            state_file: cli.json_file_name,
            graph_base_url: env_or(DEFAULT_GRAPH_BASE_URL, "AADSYNC_GRAPH_BASE_URL"),
            authority_url: env_or(DEFAULT_AUTHORITY_URL, "AADSYNC_AUTHORITY_URL"),
        })
    }
}

fn require(flag: Option<String>, env_key: &str, flag_name: &str) -> Result<String, ConfigError> {
    if let Some(value) = flag {
        if !value.is_empty() {
            return Ok(value);
        }
    }

    match env::var(env_key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(format!(
            "{} not configured. Pass the flag or set the {} environment variable",
            flag_name, env_key
        ))),
    }
}

fn env_or(default: &str, env_key: &str) -> String {
    env::var(env_key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_environment() {
        env::set_var("AADSYNC_TEST_FLAG_WINS", "from-env");
        let value = require(
            Some("from-flag".into()),
            "AADSYNC_TEST_FLAG_WINS",
            "--app_name",
        )
        .unwrap();
        assert_eq!(value, "from-flag");
        env::remove_var("AADSYNC_TEST_FLAG_WINS");
    }

    #[test]
    fn test_environment_fallback() {
        env::set_var("AADSYNC_TEST_ENV_FALLBACK", "from-env");
        let value = require(None, "AADSYNC_TEST_ENV_FALLBACK", "--tenant_id").unwrap();
        assert_eq!(value, "from-env");
        env::remove_var("AADSYNC_TEST_ENV_FALLBACK");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let result = require(None, "AADSYNC_TEST_NEVER_SET", "--spn_id");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("--spn_id"));
        assert!(err.to_string().contains("AADSYNC_TEST_NEVER_SET"));
    }

    #[test]
    fn test_empty_flag_falls_back() {
        env::set_var("AADSYNC_TEST_EMPTY_FLAG", "from-env");
        let value = require(Some(String::new()), "AADSYNC_TEST_EMPTY_FLAG", "--spn_key").unwrap();
        assert_eq!(value, "from-env");
        env::remove_var("AADSYNC_TEST_EMPTY_FLAG");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["aadsync", "--app_name", "team-app"]);
        assert_eq!(cli.json_file_name, PathBuf::from(".aad_state.json"));
        assert!(!cli.verbose);
        assert_eq!(cli.app_name.as_deref(), Some("team-app"));
    }
}
