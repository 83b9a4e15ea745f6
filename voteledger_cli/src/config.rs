use anyhow::{anyhow, Context};
use std::env::var;
use voteledger::Identity;

use crate::logging::LogFormat;

/// Verbosity selected by repeated `-v` flags
#[derive(PartialEq, Copy, Clone, Debug)]
pub enum Verbosity {
    Warn,
    Info,
    Debug,
}

impl Verbosity {
    pub fn from_occurrences(occurrences: u64) -> Self {
        match occurrences {
            0 => Verbosity::Warn,
            1 => Verbosity::Info,
            _ => Verbosity::Debug,
        }
    }

    pub fn level(self) -> &'static str {
        match self {
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
        }
    }
}

pub struct Config {
    pub admin: Identity,
    pub log_format: LogFormat,
    pub verbosity: Verbosity,
}

impl Config {
    /// Global flags may appear before or after the subcommand
    pub fn from_matches(matches: &clap::ArgMatches) -> anyhow::Result<Self> {
        let sub = matches.subcommand().1;
        let admin = sub
            .and_then(|sub| sub.value_of("admin"))
            .or_else(|| matches.value_of("admin"));
        let occurrences = sub
            .map(|sub| sub.occurrences_of("v"))
            .unwrap_or(0)
            .max(matches.occurrences_of("v"));

        Config::resolve(admin, occurrences, |key| var(key).ok())
    }

    /// Command-line values win over environment variables
    pub fn resolve<F>(admin: Option<&str>, occurrences: u64, env: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin = match admin {
            Some(admin) => admin.to_owned(),
            None => env("VOTELEDGER_ADMIN").ok_or_else(|| {
                anyhow!("administrator identity must be set with --admin or VOTELEDGER_ADMIN")
            })?,
        };
        let admin: Identity = admin
            .parse()
            .with_context(|| format!("invalid administrator identity: {}", admin))?;

        let log_format = match env("VOTELEDGER_LOG_FORMAT") {
            Some(format) => format.parse()?,
            None => LogFormat::Human,
        };

        Ok(Config {
            admin,
            log_format,
            verbosity: Verbosity::from_occurrences(occurrences),
        })
    }
}
