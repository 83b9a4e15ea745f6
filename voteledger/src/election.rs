use crate::*;

/// Election aggregate: lifecycle state plus the candidate list, voter set and
/// ballot box it exclusively owns.
///
/// Every mutating method checks all of its preconditions before writing, so an
/// `Err` always leaves the election untouched.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Election {
    id: ElectionId,
    name: String,
    state: ElectionState,
    candidates: CandidateRegistry,
    voters: VoterRegistry,
    ballots: BallotBox,
}

impl Election {
    /// Create a new election in the `Initiated` state with no candidates or voters
    pub fn new(id: ElectionId, name: String) -> Self {
        Election {
            id,
            name,
            state: ElectionState::Initiated,
            candidates: CandidateRegistry::default(),
            voters: VoterRegistry::default(),
            ballots: BallotBox::default(),
        }
    }

    pub fn id(&self) -> ElectionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ElectionState {
        self.state
    }

    pub fn candidates(&self) -> &CandidateRegistry {
        &self.candidates
    }

    pub fn voters(&self) -> &VoterRegistry {
        &self.voters
    }

    pub fn ballots(&self) -> &BallotBox {
        &self.ballots
    }

    pub fn is_voter_registered(&self, voter: &Identity) -> bool {
        self.voters.is_registered(voter)
    }

    pub fn has_voted(&self, voter: &Identity) -> bool {
        self.ballots.has_voted(voter)
    }

    // Registration
    // ------------

    pub fn check_add_candidate(&self) -> Result<(), ValidationError> {
        if !self.state.is_open_for_registration() {
            return Err(ValidationError::CandidatesLocked(self.id));
        }
        Ok(())
    }

    pub fn add_candidate(&mut self, name: String) -> Result<CandidateId, ValidationError> {
        self.check_add_candidate()?;
        Ok(self.candidates.push(name))
    }

    pub fn check_register_voter(&self) -> Result<(), ValidationError> {
        if !self.state.is_open_for_registration() {
            return Err(ValidationError::VotersLocked(self.id));
        }
        Ok(())
    }

    /// Register a voter. Re-registering an already registered voter succeeds
    /// without changing anything.
    pub fn register_voter(&mut self, voter: Identity) -> Result<(), ValidationError> {
        self.check_register_voter()?;
        self.voters.insert(voter);
        Ok(())
    }

    // Lifecycle
    // ---------

    pub fn check_start(&self) -> Result<(), ValidationError> {
        self.state.check_start(self.id)
    }

    pub fn start(&mut self) -> Result<(), ValidationError> {
        self.check_start()?;
        self.state = ElectionState::Active;
        Ok(())
    }

    pub fn check_end(&self) -> Result<(), ValidationError> {
        self.state.check_end(self.id)
    }

    pub fn end(&mut self) -> Result<(), ValidationError> {
        self.check_end()?;
        self.state = ElectionState::Ended;
        Ok(())
    }

    // Voting
    // ------

    pub fn check_vote(&self, voter: &Identity, candidate: CandidateId) -> Result<(), ValidationError> {
        self.ballots.check_vote(
            self.id,
            self.state,
            &self.voters,
            &self.candidates,
            voter,
            candidate,
        )
    }

    pub fn cast_vote(&mut self, voter: Identity, candidate: CandidateId) -> Result<(), ValidationError> {
        self.check_vote(&voter, candidate)?;
        self.ballots.record(&mut self.candidates, voter, candidate);
        Ok(())
    }

    /// Read-only projection for external queries
    pub fn snapshot(&self) -> ElectionSnapshot {
        ElectionSnapshot {
            id: self.id,
            name: self.name.clone(),
            state: self.state,
            candidates: self.candidates.as_slice().to_vec(),
        }
    }
}

/// Read-only view of an election: id, name, state and candidates with counts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElectionSnapshot {
    pub id: ElectionId,
    pub name: String,
    pub state: ElectionState,
    pub candidates: Vec<Candidate>,
}
