use crate::*;
use std::ops::Deref;

/// A mutating operation on the ledger
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Transaction {
    CreateElection {
        name: String,
    },
    AddCandidate {
        election: ElectionId,
        name: String,
    },
    RegisterVoter {
        election: ElectionId,
        voter: Identity,
    },
    StartElection {
        election: ElectionId,
    },
    EndElection {
        election: ElectionId,
    },
    CastVote {
        election: ElectionId,
        candidate: CandidateId,
    },
}

impl Transaction {
    /// Get the transaction type
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Transaction::CreateElection { .. } => TransactionType::CreateElection,
            Transaction::AddCandidate { .. } => TransactionType::AddCandidate,
            Transaction::RegisterVoter { .. } => TransactionType::RegisterVoter,
            Transaction::StartElection { .. } => TransactionType::StartElection,
            Transaction::EndElection { .. } => TransactionType::EndElection,
            Transaction::CastVote { .. } => TransactionType::CastVote,
        }
    }

    /// The election this transaction addresses. `None` for election creation.
    pub fn election(&self) -> Option<ElectionId> {
        match self {
            Transaction::CreateElection { .. } => None,
            Transaction::AddCandidate { election, .. }
            | Transaction::RegisterVoter { election, .. }
            | Transaction::StartElection { election }
            | Transaction::EndElection { election }
            | Transaction::CastVote { election, .. } => Some(*election),
        }
    }

    /// Who may submit this transaction
    pub fn restriction(&self) -> Restriction {
        match self {
            Transaction::CastVote { .. } => Restriction::Voter,
            _ => Restriction::Admin,
        }
    }

    /// Validate the transaction against committed state, without writing anything.
    ///
    /// Checks run in this order:
    ///  - the caller is the administrator (admin transactions only)
    ///  - the addressed election exists
    ///  - the election's state and registries permit the operation
    pub fn validate_tx<S: Store>(
        &self,
        authority: &Authority,
        caller: &Identity,
        store: &S,
    ) -> Result<(), ValidationError> {
        if self.restriction() == Restriction::Admin {
            authority.authorize(caller)?;
        }

        match self {
            Transaction::CreateElection { .. } => Ok(()),
            Transaction::AddCandidate { election, .. } => {
                store.get_election(*election)?.check_add_candidate()
            }
            Transaction::RegisterVoter { election, .. } => {
                store.get_election(*election)?.check_register_voter()
            }
            Transaction::StartElection { election } => store.get_election(*election)?.check_start(),
            Transaction::EndElection { election } => store.get_election(*election)?.check_end(),
            Transaction::CastVote {
                election,
                candidate,
            } => store.get_election(*election)?.check_vote(caller, *candidate),
        }
    }
}

/// Authorization class of a transaction
#[derive(Serialize, Deserialize, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    /// Only the administrator
    Admin,
    /// Only a voter registered in the addressed election
    Voter,
}

/// A transaction type
#[derive(Serialize, Deserialize, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    CreateElection,
    AddCandidate,
    RegisterVoter,
    StartElection,
    EndElection,
    CastVote,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            TransactionType::CreateElection => "create_election",
            TransactionType::AddCandidate => "add_candidate",
            TransactionType::RegisterVoter => "register_voter",
            TransactionType::StartElection => "start_election",
            TransactionType::EndElection => "end_election",
            TransactionType::CastVote => "cast_vote",
        };
        write!(f, "{}", name)
    }
}

/// A transaction together with the identity of the caller submitting it.
///
/// The caller is taken as already authenticated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Call<T = Transaction> {
    pub caller: Identity,

    #[serde(flatten)]
    pub tx: T,
}

impl<T> Call<T> {
    pub fn new(caller: Identity, tx: T) -> Self {
        Call { caller, tx }
    }

    /// Get the inner transaction
    pub fn inner(&self) -> &T {
        &self.tx
    }
}

impl<T> AsRef<T> for Call<T> {
    fn as_ref(&self) -> &T {
        &self.tx
    }
}

impl<T> Deref for Call<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

/// Outcome of a committed transaction
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "receipt")]
#[serde(rename_all = "snake_case")]
pub enum Receipt {
    ElectionCreated {
        election: ElectionId,
    },
    CandidateAdded {
        election: ElectionId,
        candidate: CandidateId,
    },
    Accepted,
}
