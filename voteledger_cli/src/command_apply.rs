use crate::config::Config;
use serde_json::{json, Value};
use voteledger::{Event, Identity, Journal, Ledger};

/// Apply each journal call in order, printing one JSON line per call.
/// Returns false when any call was rejected.
pub fn command_apply(matches: &clap::ArgMatches, config: &Config) -> anyhow::Result<bool> {
    let journal = crate::load_journal(matches)?;
    let applied = apply(config.admin, &journal);

    for outcome in &applied.outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }
    if matches.is_present("events") {
        for event in &applied.events {
            println!("{}", serde_json::to_string(event)?);
        }
    }

    tracing::info!(
        calls = journal.len(),
        rejected = applied.rejected,
        "journal applied"
    );

    Ok(applied.all_accepted())
}

/// Per-call outcomes of applying a journal to a fresh ledger
pub struct Applied {
    pub outcomes: Vec<Value>,
    pub events: Vec<Event>,
    pub rejected: usize,
}

impl Applied {
    pub fn all_accepted(&self) -> bool {
        self.rejected == 0
    }
}

pub fn apply(admin: Identity, journal: &Journal) -> Applied {
    let mut ledger = Ledger::new(admin, Vec::<Event>::new());
    let mut outcomes = Vec::with_capacity(journal.len());
    let mut rejected = 0;

    for (index, call) in journal.iter().enumerate() {
        let outcome = match ledger.submit(call) {
            Ok(receipt) => json!({
                "index": index,
                "caller": call.caller,
                "type": call.transaction_type(),
                "receipt": receipt,
            }),
            Err(error) => {
                rejected += 1;
                json!({
                    "index": index,
                    "caller": call.caller,
                    "type": call.transaction_type(),
                    "error": error.kind(),
                    "message": error.to_string(),
                })
            }
        };
        outcomes.push(outcome);
    }

    Applied {
        outcomes,
        events: ledger.into_events(),
        rejected,
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use voteledger::{Call, ElectionId, Transaction, IDENTITY_LEN};

    const ADMIN: Identity = Identity::new([0xad; IDENTITY_LEN]);
    const STRANGER: Identity = Identity::new([2; IDENTITY_LEN]);

    #[test]
    fn mixed_journal_reports_each_call() {
        let journal = Journal::from(vec![
            Call::new(
                ADMIN,
                Transaction::CreateElection {
                    name: "Test Election".into(),
                },
            ),
            Call::new(
                STRANGER,
                Transaction::StartElection {
                    election: ElectionId(0),
                },
            ),
        ]);

        let applied = apply(ADMIN, &journal);
        assert!(!applied.all_accepted());
        assert_eq!(applied.rejected, 1);
        assert_eq!(applied.outcomes.len(), 2);

        let created = &applied.outcomes[0];
        assert_eq!(created["index"], 0);
        assert_eq!(created["type"], "create_election");
        assert_eq!(created["receipt"]["receipt"], "election_created");
        assert_eq!(created["receipt"]["election"], 0);
        assert!(created.get("error").is_none());

        let refused = &applied.outcomes[1];
        assert_eq!(refused["index"], 1);
        assert_eq!(refused["caller"], STRANGER.to_string());
        assert_eq!(refused["error"], "not_admin");
        assert!(refused.get("receipt").is_none());

        // Only the accepted call produced an event
        assert_eq!(applied.events.len(), 1);
        assert_eq!(applied.events[0].name(), "election_created");
        let event = serde_json::to_value(&applied.events[0]).unwrap();
        assert_eq!(event["event"], "election_created");
    }

    #[test]
    fn clean_journal_is_all_accepted() {
        let applied = apply(ADMIN, &Journal::new());
        assert!(applied.all_accepted());
        assert!(applied.outcomes.is_empty());

        let journal = Journal::from(vec![Call::new(
            ADMIN,
            Transaction::CreateElection {
                name: "Test Election".into(),
            },
        )]);
        let applied = apply(ADMIN, &journal);
        assert!(applied.all_accepted());
        assert_eq!(applied.events.len(), 1);
    }
}
