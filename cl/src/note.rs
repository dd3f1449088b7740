use std::fmt;

use rand_core::{CryptoRngCore, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    address::Address,
    asset::AssetId,
    balance::{Balance, BalanceWitness, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteHash(pub [u8; 32]);

impl NoteHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 32]> for NoteHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for NoteHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Nonce([u8; 32]);

impl Nonce {
    pub fn random(mut rng: impl RngCore) -> Self {
        let mut nonce = [0u8; 32];
        rng.fill_bytes(&mut nonce);
        Self(nonce)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// The public side of a note: everything the ledger and the validator get
/// to see. The value is hidden inside the balance commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub owner: Address,
    pub balance: Balance,
    pub nonce: Nonce,
}

impl Note {
    pub fn hash(&self) -> NoteHash {
        let mut hasher = Sha256::new();
        hasher.update(b"NOMOS_CL_NOTE_COMMIT");
        hasher.update(self.owner.as_bytes());
        hasher.update(self.balance.to_bytes());
        hasher.update(self.nonce.as_bytes());
        NoteHash(hasher.finalize().into())
    }
}

/// The opening of a note, known only to whoever created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWitness {
    pub value: Value,
    pub owner: Address,
    pub blinding: BalanceWitness,
    pub nonce: Nonce,
}

impl NoteWitness {
    pub fn new(value: Value, owner: Address, mut rng: impl CryptoRngCore) -> Self {
        Self {
            value,
            owner,
            blinding: BalanceWitness::random(&mut rng),
            nonce: Nonce::random(&mut rng),
        }
    }

    pub fn balance(&self, asset: &AssetId) -> Balance {
        self.blinding.commit(self.value, asset.unit())
    }

    pub fn commit(&self, asset: &AssetId) -> Note {
        Note {
            owner: self.owner,
            balance: self.balance(asset),
            nonce: self.nonce,
        }
    }

    pub fn note_hash(&self, asset: &AssetId) -> NoteHash {
        self.commit(asset).hash()
    }
}
