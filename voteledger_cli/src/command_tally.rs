use crate::config::Config;

pub fn command_tally(matches: &clap::ArgMatches, config: &Config) -> anyhow::Result<()> {
    let (ledger, _rejections) = crate::replay(matches, config)?;
    let election = crate::election_id(matches)?;

    let tally = ledger.tally(election)?;
    if !tally.is_final {
        tracing::warn!(election = %election, state = %tally.state, "tally is not final");
    }

    println!("{}", serde_json::to_string_pretty(&tally)?);
    Ok(())
}
