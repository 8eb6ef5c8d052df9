//! Command-line configuration

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::{FieldInput, RequestDraft};
use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_LOG_FILTER, DEFAULT_TIMEOUT_SECS};
use crate::models::{HeaderEntry, HttpMethod};

#[derive(Parser, Debug)]
#[command(name = "restless", version, about = "Keyboard-driven terminal HTTP client")]
pub struct Args {
    /// Initial request URL
    #[arg(long)]
    pub url: Option<String>,

    /// Initial method (GET, POST, PUT, DELETE, PATCH, HEAD)
    #[arg(long, value_parser = parse_method)]
    pub method: Option<HttpMethod>,

    /// Initial request body
    #[arg(long)]
    pub body: Option<String>,

    /// Request header as "Key: Value" (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<HeaderEntry>,

    /// Query parameter as "key=value" (repeatable, later keys win)
    #[arg(long = "param", short = 'p', value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Exchange timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Log file path
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// tracing filter directive, e.g. "debug" or "restless_tui=trace"
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub log_filter: String,
    pub seed: RequestDraft,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        let seed = RequestDraft {
            method: args.method,
            url: FieldInput::new(args.url.unwrap_or_default()),
            body: FieldInput::new(args.body.unwrap_or_default()),
            headers: args.headers,
            params: args.params.into_iter().collect::<BTreeMap<_, _>>(),
        };

        Settings {
            timeout: Duration::from_secs(args.timeout),
            log_file: args.log_file,
            log_filter: args.log_filter,
            seed,
        }
    }
}

pub fn load_settings() -> Settings {
    Args::parse().into()
}

fn parse_method(s: &str) -> Result<HttpMethod, String> {
    HttpMethod::parse(s).ok_or_else(|| format!("unsupported method `{}`", s))
}

fn parse_header(s: &str) -> Result<HeaderEntry, String> {
    let (key, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected \"Key: Value\", got `{}`", s))?;
    let header = HeaderEntry::new(key.trim(), value.trim());
    if !header.is_complete() {
        return Err(format!("header key and value must be non-empty in `{}`", s));
    }
    Ok(header)
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected \"key=value\", got `{}`", s))?;
    if key.is_empty() {
        return Err(format!("parameter key must be non-empty in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings: Settings = Args::try_parse_from(["restless"]).unwrap().into();
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.log_file, PathBuf::from("restless.log"));
        assert_eq!(settings.seed.method, None);
        assert!(settings.seed.url.is_empty());
        assert!(settings.seed.params.is_empty());
    }

    #[test]
    fn test_seed_draft_from_flags() {
        let args = Args::try_parse_from([
            "restless",
            "--url",
            "https://example.com/search",
            "--method",
            "post",
            "-H",
            "Accept: application/json",
            "-H",
            "X-Trace:  abc ",
            "-p",
            "q=test",
            "-p",
            "q=again",
            "--timeout",
            "5",
        ])
        .unwrap();
        let settings: Settings = args.into();

        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.seed.method, Some(HttpMethod::POST));
        assert_eq!(settings.seed.url.value(), "https://example.com/search");
        assert_eq!(
            settings.seed.headers,
            vec![
                HeaderEntry::new("Accept", "application/json"),
                HeaderEntry::new("X-Trace", "abc"),
            ]
        );
        assert_eq!(settings.seed.params.len(), 1);
        assert_eq!(settings.seed.params["q"], "again");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["restless", "--method", "TRACE"]).is_err());
        assert!(Args::try_parse_from(["restless", "-H", "no-colon"]).is_err());
        assert!(Args::try_parse_from(["restless", "-H", ": value"]).is_err());
        assert!(Args::try_parse_from(["restless", "-p", "=x"]).is_err());
        assert!(Args::try_parse_from(["restless", "--timeout", "0"]).is_err());
    }
}
