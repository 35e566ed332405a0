//! Runtime settings, read from the environment and overridden by flags.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use mac::DEFAULT_SCAN_LIMIT;

pub const ENV_REGISTRY_SCAN_LIMIT: &str = "MACSPOOF_REGISTRY_SCAN_LIMIT";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "MACSPOOF_HTTP_TIMEOUT_SECS";
pub const ENV_USER_AGENT_SOURCE: &str = "MACSPOOF_USER_AGENT_SOURCE";
pub const ENV_HTTP_BODY_LIMIT: &str = "MACSPOOF_HTTP_BODY_LIMIT";

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_HTTP_BODY_LIMIT: u64 = 256 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of adapter registry subkeys inspected when looking up an
    /// interface on Windows.
    pub registry_scan_limit: usize,
    /// Socket timeout of outbound HTTP requests.
    pub http_timeout: Duration,
    /// Largest response body read, in bytes.
    pub http_body_limit: u64,
    /// URL of a newline separated User-Agent list. When unset User-Agents
    /// are generated locally.
    pub user_agent_source: Option<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            registry_scan_limit: DEFAULT_SCAN_LIMIT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            http_body_limit: DEFAULT_HTTP_BODY_LIMIT,
            user_agent_source: None,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Config {
        Config::from_vars(|name| env::var(name).ok())
    }

    /// Reads the configuration through a variable lookup. Unset variables
    /// keep their defaults, malformed ones are logged and ignored.
    pub fn from_vars<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(limit) = parse_var::<usize, _>(&lookup, ENV_REGISTRY_SCAN_LIMIT) {
            config.registry_scan_limit = limit;
        }

        if let Some(secs) = parse_var::<u64, _>(&lookup, ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Some(limit) = parse_var::<u64, _>(&lookup, ENV_HTTP_BODY_LIMIT) {
            config.http_body_limit = limit;
        }

        config.user_agent_source = lookup(ENV_USER_AGENT_SOURCE)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        config
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring {}={:?}, not a number", name, value);
            None
        }
    }
}
