use crate::{
    check::Settings,
    cli::actions::Action,
    error::Error,
    tls::{DEFAULT_PORT, TlsConfig, TlsMode},
};
use anyhow::{Result, anyhow};
use clap::ArgMatches;
use std::path::PathBuf;

/// Fetch a required setting, treating an empty value as missing
fn required(matches: &ArgMatches, id: &str, var: &'static str) -> Result<String, Error> {
    matches
        .get_one::<String>(id)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .ok_or(Error::MissingConfig(var))
}

fn parse_days_buffer(value: &str) -> Result<i64, Error> {
    value.parse::<i64>().map_err(|_| Error::InvalidConfig {
        name: "DAYS_BUFFER",
        value: value.to_string(),
    })
}

fn extract_tls_config(matches: &ArgMatches) -> Result<TlsConfig> {
    let mode = matches
        .get_one::<String>("tls-mode")
        .map(|m| m.parse::<TlsMode>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();

    let ca = matches.get_one::<String>("tls-ca").map(PathBuf::from);

    Ok(TlsConfig { mode, ca })
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// Settings are checked in order `DOMAIN_NAME`, `SNS_TOPIC_ARN`,
/// `DAYS_BUFFER`; the first missing one is reported.
///
/// # Errors
///
/// Returns an error if a required setting is missing or invalid
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let domain = required(matches, "domain", "DOMAIN_NAME")?;
    let topic_arn = required(matches, "topic-arn", "SNS_TOPIC_ARN")?;
    let days_buffer = parse_days_buffer(&required(matches, "days-buffer", "DAYS_BUFFER")?)?;

    // Extract port with default
    let port = matches
        .get_one::<u16>("port")
        .copied()
        .unwrap_or(DEFAULT_PORT);

    let tls = extract_tls_config(matches)?;

    let json = matches.get_flag("json");

    Ok(Action::Check {
        settings: Settings {
            domain,
            port,
            topic_arn,
            days_buffer,
        },
        tls,
        json,
    })
}
