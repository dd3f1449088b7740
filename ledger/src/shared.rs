use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// A ledger shared between several clients.
///
/// [`SharedLedger::transact`] is the unit of isolation: the closure runs with
/// exclusive access, so the reads and writes of one transaction never
/// interleave with those of another.
#[derive(Debug)]
pub struct SharedLedger<L>(Arc<Mutex<L>>);

impl<L> Clone for SharedLedger<L> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<L> SharedLedger<L> {
    pub fn new(ledger: L) -> Self {
        Self(Arc::new(Mutex::new(ledger)))
    }

    pub fn transact<R>(&self, tx: impl FnOnce(&mut L) -> Result<R>) -> Result<R> {
        let mut ledger = self.0.lock().map_err(|_| Error::LedgerUnavailable)?;
        tx(&mut *ledger)
    }
}
