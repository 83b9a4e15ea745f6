//! Administered election ledger.
//!
//! A single administrator creates elections, registers candidates and voters, and
//! drives each election through `Initiated -> Active -> Ended`. Registered voters
//! cast at most one vote per election while it is active.
//!
//! All mutation goes through [`Ledger`]. Every call is validated in full against
//! committed state before anything is written, so a rejected call leaves the
//! ledger exactly as it found it.

#[macro_use]
extern crate serde;

mod authority;
mod ballot;
mod candidate;
mod election;
mod error;
mod event;
mod identity;
mod journal;
mod ledger;
mod lifecycle;
mod shared;
mod store;
mod tally;
mod transaction;
mod voter;

pub use authority::*;
pub use ballot::*;
pub use candidate::*;
pub use election::*;
pub use error::*;
pub use event::*;
pub use identity::*;
pub use journal::*;
pub use ledger::*;
pub use lifecycle::*;
pub use shared::*;
pub use store::*;
pub use tally::*;
pub use transaction::*;
pub use voter::*;
