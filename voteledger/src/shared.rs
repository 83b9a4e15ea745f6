use crate::*;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A ledger shared between threads.
///
/// Mutating calls take the write lock, so they are applied one at a time.
/// Queries take the read lock and only ever see fully committed state.
pub struct SharedLedger<E: EventSink = ()> {
    inner: Arc<RwLock<Ledger<E>>>,
}

impl<E: EventSink> SharedLedger<E> {
    pub fn new(ledger: Ledger<E>) -> Self {
        SharedLedger {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Submit a call under the write lock
    pub fn submit(&self, call: &Call) -> Result<Receipt, ValidationError> {
        self.write().submit(call)
    }

    /// Run a query against committed state
    pub fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger<E>) -> R,
    {
        f(&self.read_guard())
    }

    /// Run several mutations under one write lock
    pub fn write_with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ledger<E>) -> R,
    {
        f(&mut self.write())
    }

    // A panic while holding the lock cannot leave a half-applied call behind,
    // since every call validates before it writes. Poisoning is ignored.
    fn read_guard(&self) -> RwLockReadGuard<'_, Ledger<E>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger<E>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: EventSink> Clone for SharedLedger<E> {
    fn clone(&self) -> Self {
        SharedLedger {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: EventSink> From<Ledger<E>> for SharedLedger<E> {
    fn from(ledger: Ledger<E>) -> Self {
        SharedLedger::new(ledger)
    }
}
