use crate::*;

/// The election ledger.
///
/// Owns the election registry and the administrator identity. Every mutating
/// call is validated in full against committed state first; only then is it
/// applied, journaled, and announced to the event sink. A rejected call writes
/// nothing and emits nothing.
///
/// Mutation takes `&mut self`, so calls are serialized by construction. Use
/// [`SharedLedger`] to share a ledger between threads.
#[derive(Debug, Clone)]
pub struct Ledger<E: EventSink = ()> {
    authority: Authority,
    store: MemStore,
    journal: Journal,
    events: E,
}

/// A call refused during replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the call in the replayed sequence
    pub index: usize,
    pub call: Call,
    pub error: ValidationError,
}

impl Ledger<()> {
    /// Create a ledger that discards events
    pub fn with_admin(admin: Identity) -> Self {
        Ledger::new(admin, ())
    }
}

impl<E: EventSink> Ledger<E> {
    /// Create an empty ledger administered by `admin`
    pub fn new(admin: Identity, events: E) -> Self {
        Ledger {
            authority: Authority::new(admin),
            store: MemStore::default(),
            journal: Journal::new(),
            events,
        }
    }

    /// Rebuild a ledger by submitting `calls` in order.
    ///
    /// Rejected calls leave the ledger unchanged, exactly as they would live, and
    /// are returned alongside it.
    pub fn replay<'a, I>(admin: Identity, events: E, calls: I) -> (Self, Vec<Rejection>)
    where
        I: IntoIterator<Item = &'a Call>,
    {
        let mut ledger = Ledger::new(admin, events);
        let mut rejections = Vec::new();

        for (index, call) in calls.into_iter().enumerate() {
            if let Err(error) = ledger.submit(call) {
                rejections.push(Rejection {
                    index,
                    call: call.clone(),
                    error,
                });
            }
        }

        (ledger, rejections)
    }

    pub fn admin(&self) -> &Identity {
        self.authority.admin()
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub fn store(&self) -> &MemStore {
        &self.store
    }

    /// Every committed call, in commit order
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn into_events(self) -> E {
        self.events
    }

    // Mutating operations
    // -------------------

    /// Submit any transaction on behalf of a caller
    pub fn submit(&mut self, call: &Call) -> Result<Receipt, ValidationError> {
        let caller = &call.caller;
        match &call.tx {
            Transaction::CreateElection { name } => {
                let election = self.create_election(caller, name)?;
                Ok(Receipt::ElectionCreated { election })
            }
            Transaction::AddCandidate { election, name } => {
                let candidate = self.add_candidate(caller, *election, name)?;
                Ok(Receipt::CandidateAdded {
                    election: *election,
                    candidate,
                })
            }
            Transaction::RegisterVoter { election, voter } => {
                self.register_voter(caller, *election, *voter)?;
                Ok(Receipt::Accepted)
            }
            Transaction::StartElection { election } => {
                self.start_election(caller, *election)?;
                Ok(Receipt::Accepted)
            }
            Transaction::EndElection { election } => {
                self.end_election(caller, *election)?;
                Ok(Receipt::Accepted)
            }
            Transaction::CastVote {
                election,
                candidate,
            } => {
                self.cast_vote(caller, *election, *candidate)?;
                Ok(Receipt::Accepted)
            }
        }
    }

    /// Check whether a call would be accepted, without applying it
    pub fn validate(&self, call: &Call) -> Result<(), ValidationError> {
        call.validate_tx(&self.authority, &call.caller, &self.store)
    }

    /// Create a new election. Administrator only.
    pub fn create_election(
        &mut self,
        caller: &Identity,
        name: &str,
    ) -> Result<ElectionId, ValidationError> {
        let tx = Transaction::CreateElection {
            name: name.to_owned(),
        };
        self.check(caller, &tx)?;

        let election = self.store.create(name.to_owned());
        self.commit(
            caller,
            tx,
            Event::ElectionCreated {
                election,
                name: name.to_owned(),
            },
        );
        Ok(election)
    }

    /// Add a candidate to an election that has not started. Administrator only.
    pub fn add_candidate(
        &mut self,
        caller: &Identity,
        election: ElectionId,
        name: &str,
    ) -> Result<CandidateId, ValidationError> {
        let tx = Transaction::AddCandidate {
            election,
            name: name.to_owned(),
        };
        self.check(caller, &tx)?;

        let candidate = self
            .store
            .get_election_mut(election)?
            .add_candidate(name.to_owned())?;
        self.commit(
            caller,
            tx,
            Event::CandidateAdded {
                election,
                candidate,
                name: name.to_owned(),
            },
        );
        Ok(candidate)
    }

    /// Register a voter for an election that has not started. Administrator only.
    ///
    /// Registering the same voter again succeeds and changes nothing.
    pub fn register_voter(
        &mut self,
        caller: &Identity,
        election: ElectionId,
        voter: Identity,
    ) -> Result<(), ValidationError> {
        let tx = Transaction::RegisterVoter { election, voter };
        self.check(caller, &tx)?;

        self.store
            .get_election_mut(election)?
            .register_voter(voter)?;
        self.commit(caller, tx, Event::VoterRegistered { election, voter });
        Ok(())
    }

    /// Open an election for voting. Administrator only.
    pub fn start_election(
        &mut self,
        caller: &Identity,
        election: ElectionId,
    ) -> Result<(), ValidationError> {
        let tx = Transaction::StartElection { election };
        self.check(caller, &tx)?;

        self.store.get_election_mut(election)?.start()?;
        self.commit(caller, tx, Event::ElectionStarted { election });
        Ok(())
    }

    /// Close an election for good. Administrator only.
    pub fn end_election(
        &mut self,
        caller: &Identity,
        election: ElectionId,
    ) -> Result<(), ValidationError> {
        let tx = Transaction::EndElection { election };
        self.check(caller, &tx)?;

        self.store.get_election_mut(election)?.end()?;
        self.commit(caller, tx, Event::ElectionEnded { election });
        Ok(())
    }

    /// Cast the caller's single vote in an active election.
    pub fn cast_vote(
        &mut self,
        caller: &Identity,
        election: ElectionId,
        candidate: CandidateId,
    ) -> Result<(), ValidationError> {
        let tx = Transaction::CastVote {
            election,
            candidate,
        };
        self.check(caller, &tx)?;

        self.store
            .get_election_mut(election)?
            .cast_vote(*caller, candidate)?;
        self.commit(
            caller,
            tx,
            Event::VoteCast {
                election,
                voter: *caller,
            },
        );
        Ok(())
    }

    fn check(&self, caller: &Identity, tx: &Transaction) -> Result<(), ValidationError> {
        tx.validate_tx(&self.authority, caller, &self.store)
            .map_err(|error| {
                tracing::warn!(
                    caller = %caller,
                    tx = %tx.transaction_type(),
                    kind = error.kind(),
                    "rejected: {}",
                    error
                );
                error
            })
    }

    fn commit(&mut self, caller: &Identity, tx: Transaction, event: Event) {
        let sequence = self.journal.append(Call::new(*caller, tx));
        tracing::debug!(
            sequence,
            election = %event.election(),
            event = event.name(),
            "committed"
        );
        self.events.emit(&event);
    }

    // Queries
    // -------

    pub fn election_count(&self) -> u64 {
        self.store.election_count()
    }

    pub fn get_election(&self, election: ElectionId) -> Result<ElectionSnapshot, ValidationError> {
        Ok(self.store.get_election(election)?.snapshot())
    }

    /// Snapshots of every election, in creation order
    pub fn list_elections(&self) -> Vec<ElectionSnapshot> {
        self.store.iter().map(Election::snapshot).collect()
    }

    pub fn get_candidates(&self, election: ElectionId) -> Result<Vec<Candidate>, ValidationError> {
        Ok(self
            .store
            .get_election(election)?
            .candidates()
            .as_slice()
            .to_vec())
    }

    pub fn is_voter_registered(
        &self,
        election: ElectionId,
        voter: &Identity,
    ) -> Result<bool, ValidationError> {
        Ok(self.store.get_election(election)?.is_voter_registered(voter))
    }

    pub fn has_voted(&self, election: ElectionId, voter: &Identity) -> Result<bool, ValidationError> {
        Ok(self.store.get_election(election)?.has_voted(voter))
    }

    pub fn tally(&self, election: ElectionId) -> Result<Tally, ValidationError> {
        Ok(Tally::from_election(self.store.get_election(election)?))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn identity(n: u8) -> Identity {
        Identity::new([n; IDENTITY_LEN])
    }

    #[test]
    fn test_rejected_calls_are_silent() {
        let admin = identity(1);
        let mut ledger = Ledger::new(admin, Vec::<Event>::new());

        assert_eq!(
            ledger.create_election(&identity(2), "Test Election"),
            Err(ValidationError::NotAdmin)
        );
        assert_eq!(ledger.election_count(), 0);
        assert!(ledger.journal().is_empty());
        assert!(ledger.events().is_empty());

        ledger.create_election(&admin, "Test Election").unwrap();
        assert_eq!(ledger.journal().len(), 1);
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn test_submit_receipts() {
        let admin = identity(1);
        let voter = identity(2);
        let mut ledger = Ledger::with_admin(admin);

        let receipt = ledger
            .submit(&Call::new(
                admin,
                Transaction::CreateElection {
                    name: "Board".into(),
                },
            ))
            .unwrap();
        assert_eq!(
            receipt,
            Receipt::ElectionCreated {
                election: ElectionId(0)
            }
        );

        let receipt = ledger
            .submit(&Call::new(
                admin,
                Transaction::AddCandidate {
                    election: ElectionId(0),
                    name: "Ann".into(),
                },
            ))
            .unwrap();
        assert_eq!(
            receipt,
            Receipt::CandidateAdded {
                election: ElectionId(0),
                candidate: CandidateId(0)
            }
        );

        let register = Call::new(
            admin,
            Transaction::RegisterVoter {
                election: ElectionId(0),
                voter,
            },
        );
        assert_eq!(ledger.submit(&register), Ok(Receipt::Accepted));

        let vote = Call::new(
            voter,
            Transaction::CastVote {
                election: ElectionId(0),
                candidate: CandidateId(0),
            },
        );
        // Dry-run reports the same error the real call would
        assert_eq!(
            ledger.validate(&vote),
            Err(ValidationError::ElectionNotActive(ElectionId(0)))
        );
        assert_eq!(
            ledger.submit(&vote),
            Err(ValidationError::ElectionNotActive(ElectionId(0)))
        );

        ledger.start_election(&admin, ElectionId(0)).unwrap();
        assert_eq!(ledger.validate(&vote), Ok(()));
        // Validation alone commits nothing
        assert_eq!(ledger.has_voted(ElectionId(0), &voter), Ok(false));
        assert_eq!(ledger.submit(&vote), Ok(Receipt::Accepted));
        assert_eq!(ledger.has_voted(ElectionId(0), &voter), Ok(true));
    }

    #[test]
    fn test_reregistration_is_idempotent() {
        let admin = identity(1);
        let voter = identity(2);
        let mut ledger = Ledger::new(admin, Vec::<Event>::new());
        let election = ledger.create_election(&admin, "Board").unwrap();

        ledger.register_voter(&admin, election, voter).unwrap();
        ledger.register_voter(&admin, election, voter).unwrap();

        assert_eq!(ledger.is_voter_registered(election, &voter), Ok(true));
        assert_eq!(ledger.store().get_election(election).unwrap().voters().len(), 1);
        // Both calls succeeded, so both were announced
        let registered = ledger
            .events()
            .iter()
            .filter(|e| e.name() == "voter_registered")
            .count();
        assert_eq!(registered, 2);
    }

    #[test]
    fn test_replay_reproduces_ledger() {
        let admin = identity(1);
        let voter = identity(2);
        let mut ledger = Ledger::new(admin, Vec::<Event>::new());
        let election = ledger.create_election(&admin, "Board").unwrap();
        ledger.add_candidate(&admin, election, "Ann").unwrap();
        ledger.add_candidate(&admin, election, "Bob").unwrap();
        ledger.register_voter(&admin, election, voter).unwrap();
        ledger.start_election(&admin, election).unwrap();
        ledger.cast_vote(&voter, election, CandidateId(1)).unwrap();
        assert!(ledger.cast_vote(&voter, election, CandidateId(1)).is_err());
        ledger.end_election(&admin, election).unwrap();

        let (replayed, rejections) =
            Ledger::replay(admin, Vec::<Event>::new(), ledger.journal().iter());
        assert!(rejections.is_empty());
        assert_eq!(replayed.store(), ledger.store());
        assert_eq!(replayed.journal(), ledger.journal());
        assert_eq!(replayed.events(), ledger.events());
    }

    #[test]
    fn test_replay_reports_rejections() {
        let admin = identity(1);
        let calls = vec![
            Call::new(
                admin,
                Transaction::CreateElection {
                    name: "Board".into(),
                },
            ),
            Call::new(
                identity(3),
                Transaction::StartElection {
                    election: ElectionId(0),
                },
            ),
            Call::new(
                admin,
                Transaction::EndElection {
                    election: ElectionId(0),
                },
            ),
        ];

        let (ledger, rejections) = Ledger::replay(admin, (), &calls);
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].index, 1);
        assert_eq!(rejections[0].error, ValidationError::NotAdmin);
        assert_eq!(ledger.journal().len(), 2);
        assert_eq!(
            ledger.get_election(ElectionId(0)).unwrap().state,
            ElectionState::Ended
        );
    }

    #[test]
    fn test_queries_on_missing_election() {
        let ledger = Ledger::with_admin(identity(1));
        let missing = ValidationError::ElectionNotExists(ElectionId(0));

        assert_eq!(ledger.get_election(ElectionId(0)).unwrap_err(), missing);
        assert_eq!(ledger.get_candidates(ElectionId(0)).unwrap_err(), missing);
        assert_eq!(
            ledger.is_voter_registered(ElectionId(0), &identity(2)),
            Err(missing.clone())
        );
        assert_eq!(ledger.has_voted(ElectionId(0), &identity(2)), Err(missing.clone()));
        assert_eq!(ledger.tally(ElectionId(0)).unwrap_err(), missing);
        assert!(ledger.list_elections().is_empty());
        assert_eq!(ledger.admin(), &identity(1));
    }
}
