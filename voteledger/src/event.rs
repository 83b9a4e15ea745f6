use crate::*;
use std::sync::mpsc::Sender;

/// Notification of a committed transition.
///
/// Emitted exactly once per successful mutating call, after the call has
/// committed. Events are observational only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event")]
#[serde(rename_all = "snake_case")]
pub enum Event {
    ElectionCreated {
        election: ElectionId,
        name: String,
    },
    CandidateAdded {
        election: ElectionId,
        candidate: CandidateId,
        name: String,
    },
    VoterRegistered {
        election: ElectionId,
        voter: Identity,
    },
    ElectionStarted {
        election: ElectionId,
    },
    ElectionEnded {
        election: ElectionId,
    },
    /// Carries the voter but not the chosen candidate
    VoteCast {
        election: ElectionId,
        voter: Identity,
    },
}

impl Event {
    /// Stable event name
    pub fn name(&self) -> &'static str {
        match self {
            Event::ElectionCreated { .. } => "election_created",
            Event::CandidateAdded { .. } => "candidate_added",
            Event::VoterRegistered { .. } => "voter_registered",
            Event::ElectionStarted { .. } => "election_started",
            Event::ElectionEnded { .. } => "election_ended",
            Event::VoteCast { .. } => "vote_cast",
        }
    }

    pub fn election(&self) -> ElectionId {
        match self {
            Event::ElectionCreated { election, .. }
            | Event::CandidateAdded { election, .. }
            | Event::VoterRegistered { election, .. }
            | Event::ElectionStarted { election }
            | Event::ElectionEnded { election }
            | Event::VoteCast { election, .. } => *election,
        }
    }
}

/// Receiver of committed-transition notifications.
///
/// The ledger does not depend on whether anything is listening; a sink must not
/// fail the call that produced the event.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}

/// Discard all events
impl EventSink for () {
    fn emit(&mut self, _event: &Event) {}
}

/// Record events in order
impl EventSink for Vec<Event> {
    fn emit(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

/// Forward events to a channel. A disconnected receiver is ignored.
impl EventSink for Sender<Event> {
    fn emit(&mut self, event: &Event) {
        let _ = self.send(event.clone());
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn emit(&mut self, event: &Event) {
        (**self).emit(event)
    }
}
