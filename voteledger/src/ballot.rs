use crate::*;
use indexmap::IndexSet;

/// Record of which registered voters have voted in one election.
///
/// Membership is permanent: there is no way to withdraw or replace a ballot.
/// The candidate each voter chose is not kept here; only the candidate's count
/// is incremented.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct BallotBox {
    ballots: IndexSet<Identity>,
}

impl BallotBox {
    pub fn has_voted(&self, voter: &Identity) -> bool {
        self.ballots.contains(voter)
    }

    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    /// Check every precondition of a vote, in order.
    ///
    /// The first failing check determines the error.
    pub fn check_vote(
        &self,
        election: ElectionId,
        state: ElectionState,
        voters: &VoterRegistry,
        candidates: &CandidateRegistry,
        voter: &Identity,
        candidate: CandidateId,
    ) -> Result<(), ValidationError> {
        if !state.is_open_for_voting() {
            return Err(ValidationError::ElectionNotActive(election));
        }
        if !voters.is_registered(voter) {
            return Err(ValidationError::VoterNotRegistered(*voter));
        }
        if self.has_voted(voter) {
            return Err(ValidationError::AlreadyVoted(*voter));
        }
        if !candidates.contains(candidate) {
            return Err(ValidationError::InvalidCandidate(candidate));
        }

        Ok(())
    }

    /// Record a ballot and count it. Must only be called after `check_vote` passed.
    pub(crate) fn record(
        &mut self,
        candidates: &mut CandidateRegistry,
        voter: Identity,
        candidate: CandidateId,
    ) {
        if let Some(candidate) = candidates.get_mut(candidate) {
            if self.ballots.insert(voter) {
                candidate.vote_count += 1;
            }
        }
    }
}
