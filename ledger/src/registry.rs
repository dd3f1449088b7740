use std::collections::BTreeMap;

use cl::{Address, Balance, Note, NoteHash};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteStatus {
    Unspent,
    Spent,
}

/// What the ledger keeps for every note it has registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub status: NoteStatus,
    pub owner: Address,
    pub balance: Balance,
}

impl NoteRecord {
    pub fn unspent(note: &Note) -> Self {
        Self {
            status: NoteStatus::Unspent,
            owner: note.owner,
            balance: note.balance,
        }
    }

    pub fn is_unspent(&self) -> bool {
        self.status == NoteStatus::Unspent
    }
}

/// Per asset note registry: note lifecycle plus the approval relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRegistry {
    pub minter: Address,
    notes: BTreeMap<NoteHash, NoteRecord>,
    approvals: BTreeMap<(NoteHash, Address), bool>,
}

impl AssetRegistry {
    pub fn new(minter: Address) -> Self {
        Self {
            minter,
            notes: BTreeMap::new(),
            approvals: BTreeMap::new(),
        }
    }

    pub fn note(&self, note: &NoteHash) -> Result<&NoteRecord> {
        self.notes.get(note).ok_or(Error::UnknownNote(*note))
    }

    pub fn contains(&self, note: &NoteHash) -> bool {
        self.notes.contains_key(note)
    }

    pub fn is_approved(&self, note: &NoteHash, spender: &Address) -> bool {
        self.approvals
            .get(&(*note, *spender))
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn insert(&mut self, hash: NoteHash, record: NoteRecord) {
        self.notes.insert(hash, record);
    }

    pub(crate) fn approve(&mut self, note: NoteHash, spender: Address, approved: bool) {
        self.approvals.insert((note, spender), approved);
    }

    /// Marks the note spent. SPENT is terminal, the caller checks the note
    /// was unspent beforehand.
    pub(crate) fn spend(&mut self, note: &NoteHash) {
        if let Some(record) = self.notes.get_mut(note) {
            record.status = NoteStatus::Spent;
        }
    }
}
