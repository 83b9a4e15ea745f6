use crate::*;
use std::convert::TryFrom;

/// A named option within one election.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position of the candidate in its election's candidate list
    pub id: CandidateId,
    pub name: String,
    pub vote_count: u64,
}

/// Append-only list of candidates; the id of a candidate is its insertion index.
///
/// Names are not required to be unique. There is no removal, so ids are never
/// reassigned.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
}

impl CandidateRegistry {
    /// Id the next added candidate will receive.
    pub fn next_id(&self) -> CandidateId {
        CandidateId(self.candidates.len() as u64)
    }

    pub(crate) fn push(&mut self, name: String) -> CandidateId {
        let id = self.next_id();
        self.candidates.push(Candidate {
            id,
            name,
            vote_count: 0,
        });
        id
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.candidates.get(i))
    }

    pub(crate) fn get_mut(&mut self, id: CandidateId) -> Option<&mut Candidate> {
        usize::try_from(id.0)
            .ok()
            .and_then(move |i| self.candidates.get_mut(i))
    }

    /// Range check only; `0 <= id < len`.
    pub fn contains(&self, id: CandidateId) -> bool {
        id.0 < self.candidates.len() as u64
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Sum of every candidate's vote count
    pub fn total_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.vote_count).sum()
    }
}
