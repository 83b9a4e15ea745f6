use clap::{App, AppSettings, Arg, SubCommand};
use voteledger::{Event, Journal, Ledger, Rejection};

mod command_apply;
mod command_show;
mod command_status;
mod command_tally;
mod config;
mod logging;

use config::Config;

fn main() -> anyhow::Result<()> {
    let journal_arg = Arg::with_name("JOURNAL")
        .index(1)
        .required(true)
        .help("Call journal in JSON or CBOR format");

    let matches = App::new("VoteLedger CLI")
        .version("0.1")
        .author("Patrick Hayes <patrick.d.hayes@gmail.com>")
        .about("Replays election ledger call journals and inspects the result")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("admin")
                .long("admin")
                .takes_value(true)
                .global(true)
                .help("Administrator identity - can also be set with VOTELEDGER_ADMIN"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(
            SubCommand::with_name("apply")
                .about("Apply every call in a journal and report each outcome")
                .arg(journal_arg.clone())
                .arg(
                    Arg::with_name("events")
                        .long("events")
                        .help("Also print the emitted events"),
                ),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("Show one election, or all of them")
                .arg(journal_arg.clone())
                .arg(
                    Arg::with_name("ELECTION-ID")
                        .index(2)
                        .required(false)
                        .help("Election to show"),
                ),
        )
        .subcommand(
            SubCommand::with_name("tally")
                .about("Show the tally of an election")
                .arg(journal_arg.clone())
                .arg(
                    Arg::with_name("ELECTION-ID")
                        .index(2)
                        .required(true)
                        .help("Election to tally"),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Show whether an identity is registered and has voted")
                .arg(journal_arg)
                .arg(
                    Arg::with_name("ELECTION-ID")
                        .index(2)
                        .required(true)
                        .help("Election to check"),
                )
                .arg(
                    Arg::with_name("IDENTITY")
                        .index(3)
                        .required(true)
                        .help("Voter identity, hex encoded"),
                ),
        )
        .get_matches();

    let config = Config::from_matches(&matches)?;
    logging::init_logging(config.log_format, config.verbosity.level());
    tracing::info!(admin = %config.admin, "configured");

    // Subcommands
    if let Some(matches) = matches.subcommand_matches("apply") {
        let all_accepted = command_apply::command_apply(matches, &config)?;
        if !all_accepted {
            std::process::exit(2);
        }
    }
    if let Some(matches) = matches.subcommand_matches("show") {
        command_show::command_show(matches, &config)?;
    }
    if let Some(matches) = matches.subcommand_matches("tally") {
        command_tally::command_tally(matches, &config)?;
    }
    if let Some(matches) = matches.subcommand_matches("status") {
        command_status::command_status(matches, &config)?;
    }

    Ok(())
}

/// Read and decode a journal file
pub fn load_journal(matches: &clap::ArgMatches) -> anyhow::Result<Journal> {
    use anyhow::Context;

    let filename = matches
        .value_of("JOURNAL")
        .context("journal filename required")?;
    let bytes = std::fs::read(filename).with_context(|| format!("unable to read {}", filename))?;
    let journal =
        Journal::from_bytes(&bytes).with_context(|| format!("unable to decode {}", filename))?;

    tracing::debug!(file = filename, calls = journal.len(), "loaded journal");
    Ok(journal)
}

/// Replay a journal file against a fresh ledger
pub fn replay(
    matches: &clap::ArgMatches,
    config: &Config,
) -> anyhow::Result<(Ledger<Vec<Event>>, Vec<Rejection>)> {
    let journal = load_journal(matches)?;
    let (ledger, rejections) = Ledger::replay(config.admin, Vec::new(), &journal);

    for rejection in &rejections {
        tracing::warn!(
            index = rejection.index,
            kind = rejection.error.kind(),
            "journal call rejected: {}",
            rejection.error
        );
    }
    Ok((ledger, rejections))
}

/// Parse the ELECTION-ID argument
pub fn election_id(matches: &clap::ArgMatches) -> anyhow::Result<voteledger::ElectionId> {
    use anyhow::Context;

    let raw = matches
        .value_of("ELECTION-ID")
        .context("election id required")?;
    raw.parse()
        .with_context(|| format!("invalid election id: {}", raw))
}
