use cl::{Address, AssetId, NoteHash};
use ledger::{Error, NoteLedger, Receipt, Result, SharedLedger};
use tracing::{debug, error, info, warn};

use crate::config::AuthorityConfig;

/// Custodian of notes it holds on behalf of its owner.
///
/// The authority owns no note data. It gates approvals on notes it holds and
/// relays transfer proofs; the ledger stays the single source of truth for
/// note status and approvals.
#[derive(Debug)]
pub struct BatchApproval<L> {
    ledger: SharedLedger<L>,
    address: Address,
    owner: Address,
}

impl<L> Clone for BatchApproval<L> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            address: self.address,
            owner: self.owner,
        }
    }
}

impl<L: NoteLedger> BatchApproval<L> {
    pub fn new(ledger: SharedLedger<L>, address: Address, owner: Address) -> Self {
        Self {
            ledger,
            address,
            owner,
        }
    }

    pub fn from_config(ledger: SharedLedger<L>, config: &AuthorityConfig) -> Self {
        Self::new(ledger, config.address, config.owner)
    }

    /// The address notes held by this authority are owned by.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Approves `spender` to spend every note in `note_hashes`.
    ///
    /// Either every note is approved or none is: the whole batch is checked
    /// before the first approval is written, all within one ledger
    /// transaction. Repeated hashes are harmless re-grants and an empty batch
    /// does nothing.
    pub fn batch_approve(
        &self,
        caller: &Address,
        note_hashes: &[NoteHash],
        asset: &AssetId,
        spender: &Address,
    ) -> Result<()> {
        if *caller != self.owner {
            warn!("batch approval by non-owner {} rejected", caller);
            return Err(Error::Unauthorized(*caller));
        }

        self.ledger.transact(|ledger| {
            let mut previous = Vec::with_capacity(note_hashes.len());
            for note in note_hashes {
                let record = ledger.note(asset, note)?;
                if !record.is_unspent() {
                    warn!("batch contains spent note {}, approving nothing", note);
                    return Err(Error::OnlyUnspentNotesApprovable(*note));
                }
                if record.owner != self.address {
                    return Err(Error::NotNoteOwner {
                        note: *note,
                        approver: self.address,
                    });
                }
                previous.push(ledger.is_approved(asset, note, spender)?);
            }

            for (i, note) in note_hashes.iter().enumerate() {
                if let Err(e) = ledger.set_approved(asset, note, &self.address, spender, true) {
                    restore(ledger, asset, &self.address, spender, &note_hashes[..i], &previous);
                    return Err(e);
                }
            }

            info!(
                "approved {} for {} notes of asset {}",
                spender,
                note_hashes.len(),
                asset
            );
            Ok(())
        })
    }

    /// Forwards a transfer proof to the ledger on behalf of `submitter`.
    /// Ledger failures are returned as they are.
    pub fn proof_validation(
        &self,
        proof: &[u8],
        asset: &AssetId,
        submitter: &Address,
    ) -> Result<Receipt> {
        debug!("relaying {} byte proof from {}", proof.len(), submitter);
        self.ledger
            .transact(|ledger| ledger.apply_proof(asset, proof, submitter))
    }
}

/// Puts back the approvals recorded before a batch started writing.
/// Walks backwards so repeated hashes end on their original value.
/// Each note written here already accepted a write in this transaction, so
/// [`NoteLedger::set_approved`] is expected to accept this one too.
fn restore<L: NoteLedger>(
    ledger: &mut L,
    asset: &AssetId,
    approver: &Address,
    spender: &Address,
    written: &[NoteHash],
    previous: &[bool],
) {
    for (note, approved) in written.iter().zip(previous).rev() {
        if let Err(e) = ledger.set_approved(asset, note, approver, spender, *approved) {
            error!("failed to restore approval of note {}: {}", note, e);
        }
    }
}
