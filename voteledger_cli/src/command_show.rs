use crate::config::Config;

pub fn command_show(matches: &clap::ArgMatches, config: &Config) -> anyhow::Result<()> {
    let (ledger, _rejections) = crate::replay(matches, config)?;

    if matches.is_present("ELECTION-ID") {
        let election = crate::election_id(matches)?;
        let snapshot = ledger.get_election(election)?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&ledger.list_elections())?);
    }

    Ok(())
}
