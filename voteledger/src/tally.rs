use crate::*;

/// Result of counting an election's ballots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub election: ElectionId,
    pub state: ElectionState,

    /// True once the election has ended and the counts can no longer change
    pub is_final: bool,

    /// Number of ballots cast. Always equal to the sum of `results` votes.
    pub total_ballots: u64,

    /// Candidates ranked by votes, most first; ties keep candidate order.
    pub results: Vec<TallyResult>,

    /// Every candidate sharing the highest count. Empty when no votes were cast.
    pub leaders: Vec<CandidateId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TallyResult {
    pub candidate: CandidateId,
    pub name: String,
    pub votes: u64,
}

impl Tally {
    pub fn from_election(election: &Election) -> Self {
        let mut results: Vec<TallyResult> = election
            .candidates()
            .iter()
            .map(|c| TallyResult {
                candidate: c.id,
                name: c.name.clone(),
                votes: c.vote_count,
            })
            .collect();
        results.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.candidate.cmp(&b.candidate)));

        let top = results.first().map(|r| r.votes).unwrap_or(0);
        let leaders = if top == 0 {
            vec![]
        } else {
            results
                .iter()
                .take_while(|r| r.votes == top)
                .map(|r| r.candidate)
                .collect()
        };

        Tally {
            election: election.id(),
            state: election.state(),
            is_final: election.state().is_terminal(),
            total_ballots: election.ballots().len() as u64,
            results,
            leaders,
        }
    }

    /// The single leading candidate, if there is exactly one
    pub fn winner(&self) -> Option<CandidateId> {
        match self.leaders.as_slice() {
            [winner] => Some(*winner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn voter(n: u8) -> Identity {
        Identity::new([n; IDENTITY_LEN])
    }

    #[test]
    fn test_tally_ranking() {
        let mut election = Election::new(ElectionId(0), "Test Election".into());
        for name in &["Jhon", "Tim", "Ann"] {
            election.add_candidate(name.to_string()).unwrap();
        }
        for n in 1..=4 {
            election.register_voter(voter(n)).unwrap();
        }

        let empty = Tally::from_election(&election);
        assert!(empty.leaders.is_empty());
        assert_eq!(empty.winner(), None);
        assert!(!empty.is_final);

        election.start().unwrap();
        election.cast_vote(voter(1), CandidateId(2)).unwrap();
        election.cast_vote(voter(2), CandidateId(1)).unwrap();
        election.cast_vote(voter(3), CandidateId(2)).unwrap();

        let tally = Tally::from_election(&election);
        assert_eq!(tally.total_ballots, 3);
        assert_eq!(tally.results[0].candidate, CandidateId(2));
        assert_eq!(tally.results[0].votes, 2);
        assert_eq!(tally.results[1].candidate, CandidateId(1));
        assert_eq!(tally.results[2].candidate, CandidateId(0));
        assert_eq!(tally.winner(), Some(CandidateId(2)));

        // A tie produces two leaders and no single winner
        election.cast_vote(voter(4), CandidateId(1)).unwrap();
        election.end().unwrap();
        let tally = Tally::from_election(&election);
        assert!(tally.is_final);
        assert_eq!(tally.leaders, vec![CandidateId(1), CandidateId(2)]);
        assert_eq!(tally.winner(), None);
        assert_eq!(
            tally.results.iter().map(|r| r.votes).sum::<u64>(),
            tally.total_ballots
        );
    }
}
