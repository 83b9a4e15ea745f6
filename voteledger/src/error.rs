use crate::*;

use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("voteledger: invalid identity - invalid hexidecimal")]
    IdentityBadHex,

    #[error("voteledger: invalid identity - wrong length: expected 20 bytes, found {0}")]
    IdentityBadLen(usize),

    #[error("voteledger: CBOR error (de)serializing journal: {0}")]
    CBORError(#[from] serde_cbor::Error),

    #[error("voteledger: JSON error (de)serializing journal: {0}")]
    JSONError(#[from] serde_json::Error),

    #[error("voteledger: error deserializing journal: unknown format")]
    DeserializationUnknownFormat,

    #[error("voteledger: {0}")]
    Validation(#[from] ValidationError),
}

/// Rejection of an attempted call.
///
/// A call that fails with any of these has written nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("voteledger validation: caller is not the administrator")]
    NotAdmin,

    #[error("voteledger validation: election {0} does not exist")]
    ElectionNotExists(ElectionId),

    #[error("voteledger validation: election {0} has already started")]
    ElectionAlreadyActive(ElectionId),

    #[error("voteledger validation: election {0} has already ended")]
    ElectionAlreadyEnded(ElectionId),

    #[error("voteledger validation: election {0} is not open for voting")]
    ElectionNotActive(ElectionId),

    #[error("voteledger validation: election {0} has started, candidates can no longer be added")]
    CandidatesLocked(ElectionId),

    #[error("voteledger validation: election {0} has started, voters can no longer be registered")]
    VotersLocked(ElectionId),

    #[error("voteledger validation: voter {0} is not registered for this election")]
    VoterNotRegistered(Identity),

    #[error("voteledger validation: voter {0} has already voted in this election")]
    AlreadyVoted(Identity),

    #[error("voteledger validation: candidate {0} does not exist in this election")]
    InvalidCandidate(CandidateId),
}

impl ValidationError {
    /// Stable snake_case name of the error kind, for machine consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::NotAdmin => "not_admin",
            ValidationError::ElectionNotExists(_) => "election_not_exists",
            ValidationError::ElectionAlreadyActive(_) => "election_already_active",
            ValidationError::ElectionAlreadyEnded(_) => "election_already_ended",
            ValidationError::ElectionNotActive(_) => "election_not_active",
            ValidationError::CandidatesLocked(_) => "candidates_locked",
            ValidationError::VotersLocked(_) => "voters_locked",
            ValidationError::VoterNotRegistered(_) => "voter_not_registered",
            ValidationError::AlreadyVoted(_) => "already_voted",
            ValidationError::InvalidCandidate(_) => "invalid_candidate",
        }
    }
}
