use cl::{Address, AssetId, NoteHash};
use thiserror::Error;

use crate::validator::ProofError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown note {0}")]
    UnknownNote(NoteHash),
    #[error("unknown asset {0}")]
    UnknownAsset(AssetId),
    #[error("asset {0} is already registered")]
    AssetExists(AssetId),
    #[error("only unspent notes can be approved ({0})")]
    OnlyUnspentNotesApprovable(NoteHash),
    #[error("only the note owner can approve a spender (note {note}, approver {approver})")]
    NotNoteOwner { note: NoteHash, approver: Address },
    #[error("sender does not have approval to spend input note ({0})")]
    NotApproved(NoteHash),
    #[error("input note status is not UNSPENT ({0})")]
    NotUnspent(NoteHash),
    #[error("proof validation failed: {0}")]
    InvalidProof(#[from] ProofError),
    #[error("output note exists ({0})")]
    OutputNoteExists(NoteHash),
    #[error("{0} is not authorized to perform this operation")]
    Unauthorized(Address),
    #[error("ledger is unavailable")]
    LedgerUnavailable,
}
