use crate::*;
use num_enum::TryFromPrimitive;

/// Lifecycle state of an election.
///
/// States only ever advance `Initiated -> Active -> Ended`; `Ended` is terminal.
/// The numeric codes are stable.
#[derive(Serialize, Deserialize, TryFromPrimitive, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ElectionState {
    Initiated = 0,
    Active = 1,
    Ended = 2,
}

impl ElectionState {
    /// Check that the election may be started.
    pub fn check_start(self, election: ElectionId) -> Result<(), ValidationError> {
        match self {
            ElectionState::Initiated => Ok(()),
            ElectionState::Active => Err(ValidationError::ElectionAlreadyActive(election)),
            ElectionState::Ended => Err(ValidationError::ElectionAlreadyEnded(election)),
        }
    }

    /// Check that the election may be ended. Ending is legal from `Initiated` too.
    pub fn check_end(self, election: ElectionId) -> Result<(), ValidationError> {
        match self {
            ElectionState::Initiated | ElectionState::Active => Ok(()),
            ElectionState::Ended => Err(ValidationError::ElectionAlreadyEnded(election)),
        }
    }

    /// Candidates and voters may only be added while `Initiated`.
    pub fn is_open_for_registration(self) -> bool {
        self == ElectionState::Initiated
    }

    pub fn is_open_for_voting(self) -> bool {
        self == ElectionState::Active
    }

    pub fn is_terminal(self) -> bool {
        self == ElectionState::Ended
    }

    pub fn name(self) -> &'static str {
        match self {
            ElectionState::Initiated => "initiated",
            ElectionState::Active => "active",
            ElectionState::Ended => "ended",
        }
    }
}

impl Default for ElectionState {
    fn default() -> Self {
        ElectionState::Initiated
    }
}

impl std::fmt::Display for ElectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
