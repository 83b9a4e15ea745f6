use crate::config::Config;
use anyhow::Context;
use serde_json::json;
use voteledger::Identity;

pub fn command_status(matches: &clap::ArgMatches, config: &Config) -> anyhow::Result<()> {
    let (ledger, _rejections) = crate::replay(matches, config)?;
    let election = crate::election_id(matches)?;

    let raw = matches.value_of("IDENTITY").context("identity required")?;
    let voter: Identity = raw
        .parse()
        .with_context(|| format!("invalid identity: {}", raw))?;

    let registered = ledger.is_voter_registered(election, &voter)?;
    let voted = ledger.has_voted(election, &voter)?;

    let status = json!({
        "election": election,
        "voter": voter,
        "registered": registered,
        "voted": voted,
    });
    println!("{}", serde_json::to_string_pretty(&status)?);

    Ok(())
}
