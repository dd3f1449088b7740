use std::collections::BTreeMap;

use cl::{Address, AssetId, Note, NoteHash};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    registry::{AssetRegistry, NoteRecord, NoteStatus},
    validator::{JoinSplitValidator, ProofValidator},
};

/// Confirmation that a proof was accepted and its state transition applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub asset: AssetId,
    pub submitter: Address,
    pub proof_id: [u8; 32],
    pub consumed: Vec<NoteHash>,
    pub produced: Vec<NoteHash>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    AssetCreated {
        asset: AssetId,
        minter: Address,
    },
    NoteCreated {
        asset: AssetId,
        note: NoteHash,
        owner: Address,
    },
    NoteSpent {
        asset: AssetId,
        note: NoteHash,
    },
    NoteApproved {
        asset: AssetId,
        note: NoteHash,
        spender: Address,
        approved: bool,
    },
}

/// The note ledger as seen by its clients.
///
/// Every mutating call either applies in full or fails leaving the ledger
/// untouched.
pub trait NoteLedger {
    fn status(&self, asset: &AssetId, note: &NoteHash) -> Result<NoteStatus>;

    fn note(&self, asset: &AssetId, note: &NoteHash) -> Result<NoteRecord>;

    fn is_approved(&self, asset: &AssetId, note: &NoteHash, spender: &Address) -> Result<bool>;

    /// Grants (or revokes) `spender`'s permission to spend `note`.
    /// Only the note owner may call this and only while the note is unspent.
    ///
    /// Within one transaction, a write to a note whose approval was just
    /// written successfully must not fail. Batch callers rely on this to put
    /// back earlier values when a later write is refused. An approval that
    /// was never granted reads the same as one explicitly set to `false`.
    fn set_approved(
        &mut self,
        asset: &AssetId,
        note: &NoteHash,
        approver: &Address,
        spender: &Address,
        approved: bool,
    ) -> Result<()>;

    /// Validates `proof` and, if every input is approved for `submitter`
    /// and unspent, spends the inputs and registers the outputs.
    fn apply_proof(&mut self, asset: &AssetId, proof: &[u8], submitter: &Address)
        -> Result<Receipt>;
}

/// In-memory note ledger backed by a [`ProofValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZkLedger<V = JoinSplitValidator> {
    validator: V,
    assets: BTreeMap<AssetId, AssetRegistry>,
    events: Vec<LedgerEvent>,
}

impl ZkLedger<JoinSplitValidator> {
    pub fn new() -> Self {
        Self::with_validator(JoinSplitValidator)
    }
}

impl<V: ProofValidator> ZkLedger<V> {
    pub fn with_validator(validator: V) -> Self {
        Self {
            validator,
            assets: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn create_asset(&mut self, asset: AssetId, minter: Address) -> Result<()> {
        if self.assets.contains_key(&asset) {
            return Err(Error::AssetExists(asset));
        }
        info!("registering asset {} with minter {}", asset, minter);
        self.assets.insert(asset, AssetRegistry::new(minter));
        self.events.push(LedgerEvent::AssetCreated { asset, minter });
        Ok(())
    }

    /// Registers freshly minted notes as unspent. Checking that the minted
    /// value is backed is the mint proof's job, not the ledger's.
    pub fn confidential_mint(
        &mut self,
        asset: &AssetId,
        minter: &Address,
        notes: &[Note],
    ) -> Result<Vec<NoteHash>> {
        let registry = self.registry(asset)?;
        if registry.minter != *minter {
            return Err(Error::Unauthorized(*minter));
        }

        let hashes = notes.iter().map(Note::hash).collect::<Vec<_>>();
        if let Some(dup) = hashes.iter().duplicates().next() {
            return Err(Error::OutputNoteExists(*dup));
        }
        if let Some(existing) = hashes.iter().find(|h| registry.contains(h)) {
            return Err(Error::OutputNoteExists(*existing));
        }

        let registry = self.registry_mut(asset)?;
        for (hash, note) in hashes.iter().zip(notes) {
            registry.insert(*hash, NoteRecord::unspent(note));
        }
        self.events
            .extend(hashes.iter().zip(notes).map(|(hash, note)| LedgerEvent::NoteCreated {
                asset: *asset,
                note: *hash,
                owner: note.owner,
            }));

        debug!("minted {} notes of asset {}", hashes.len(), asset);
        Ok(hashes)
    }

    fn registry(&self, asset: &AssetId) -> Result<&AssetRegistry> {
        self.assets.get(asset).ok_or(Error::UnknownAsset(*asset))
    }

    fn registry_mut(&mut self, asset: &AssetId) -> Result<&mut AssetRegistry> {
        self.assets.get_mut(asset).ok_or(Error::UnknownAsset(*asset))
    }
}

impl<V: ProofValidator> NoteLedger for ZkLedger<V> {
    fn status(&self, asset: &AssetId, note: &NoteHash) -> Result<NoteStatus> {
        Ok(self.registry(asset)?.note(note)?.status)
    }

    fn note(&self, asset: &AssetId, note: &NoteHash) -> Result<NoteRecord> {
        self.registry(asset)?.note(note).copied()
    }

    fn is_approved(&self, asset: &AssetId, note: &NoteHash, spender: &Address) -> Result<bool> {
        Ok(self.registry(asset)?.is_approved(note, spender))
    }

    fn set_approved(
        &mut self,
        asset: &AssetId,
        note: &NoteHash,
        approver: &Address,
        spender: &Address,
        approved: bool,
    ) -> Result<()> {
        let record = *self.registry(asset)?.note(note)?;
        if !record.is_unspent() {
            warn!("refusing to change approval of spent note {}", note);
            return Err(Error::OnlyUnspentNotesApprovable(*note));
        }
        if record.owner != *approver {
            return Err(Error::NotNoteOwner {
                note: *note,
                approver: *approver,
            });
        }

        self.registry_mut(asset)?.approve(*note, *spender, approved);
        self.events.push(LedgerEvent::NoteApproved {
            asset: *asset,
            note: *note,
            spender: *spender,
            approved,
        });
        debug!("note {} approval for {} set to {}", note, spender, approved);
        Ok(())
    }

    fn apply_proof(
        &mut self,
        asset: &AssetId,
        proof: &[u8],
        submitter: &Address,
    ) -> Result<Receipt> {
        let registry = self.registry(asset)?;
        let transfer = self.validator.validate(asset, proof, submitter).map_err(|e| {
            warn!("proof from {} rejected: {}", submitter, e);
            Error::from(e)
        })?;

        // Nothing is written until every input and output has been checked.
        for input in &transfer.inputs {
            registry.note(input)?;
            if !registry.is_approved(input, submitter) {
                return Err(Error::NotApproved(*input));
            }
        }
        for input in &transfer.inputs {
            if !registry.note(input)?.is_unspent() {
                return Err(Error::NotUnspent(*input));
            }
        }
        let outputs = transfer
            .outputs
            .iter()
            .map(|note| (note.hash(), note))
            .collect::<Vec<_>>();
        if let Some((existing, _)) = outputs.iter().find(|(hash, _)| registry.contains(hash)) {
            return Err(Error::OutputNoteExists(*existing));
        }

        let registry = self.registry_mut(asset)?;
        for input in &transfer.inputs {
            registry.spend(input);
        }
        for (hash, note) in &outputs {
            registry.insert(*hash, NoteRecord::unspent(note));
        }

        self.events.extend(transfer.inputs.iter().map(|note| LedgerEvent::NoteSpent {
            asset: *asset,
            note: *note,
        }));
        self.events
            .extend(outputs.iter().map(|(hash, note)| LedgerEvent::NoteCreated {
                asset: *asset,
                note: *hash,
                owner: note.owner,
            }));

        let receipt = Receipt {
            asset: *asset,
            submitter: *submitter,
            proof_id: Sha256::digest(proof).into(),
            consumed: transfer.inputs,
            produced: outputs.into_iter().map(|(hash, _)| hash).collect(),
        };
        info!(
            "applied proof from {}: {} notes spent, {} notes created",
            submitter,
            receipt.consumed.len(),
            receipt.produced.len()
        );
        Ok(receipt)
    }
}
