use std::time::Duration;

use crate::types::LogLevel;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub log_level: LogLevel,
}

impl Config {
    pub fn from_cli(cli: &crate::cli::Cli) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(&cli.base_url)?,
            timeout: parse_timeout(cli.timeout_secs)?,
            log_level: cli.log_level,
        })
    }
}

/// Accept only absolute http(s) URLs; drop trailing slashes so the photos
/// path can be appended.
pub(crate) fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| anyhow::anyhow!("Invalid --base-url '{}': {}", trimmed, e))?;
    match url.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!(
            "Invalid --base-url '{}': scheme must be http or https, got '{}'",
            trimmed,
            other
        ),
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn parse_timeout(secs: Option<u64>) -> anyhow::Result<Option<Duration>> {
    match secs {
        Some(0) => anyhow::bail!("--timeout-secs must be greater than zero"),
        Some(s) => Ok(Some(Duration::from_secs(s))),
        None => Ok(None),
    }
}
