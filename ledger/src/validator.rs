use cl::{Address, AssetId, JoinSplitProof, Note, NoteHash, MAX_INPUTS, MAX_OUTPUTS};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("malformed proof data: {0}")]
    Malformed(String),
    #[error("proof is bound to asset {found}, expected {expected}")]
    AssetMismatch { expected: AssetId, found: AssetId },
    #[error("proof is bound to sender {found}, expected {expected}")]
    SenderMismatch { expected: Address, found: Address },
    #[error("proof has no input notes")]
    NoInputs,
    #[error("proof has {0} input notes, at most {max} are allowed", max = MAX_INPUTS)]
    TooManyInputs(usize),
    #[error("proof has {0} output notes, at most {max} are allowed", max = MAX_OUTPUTS)]
    TooManyOutputs(usize),
    #[error("proof repeats a note")]
    DuplicateNotes,
    #[error("proof does not conserve value")]
    Unbalanced,
}

/// The outcome of a successful cryptographic validation: the notes a proof
/// consumes and the notes it produces. Says nothing about ledger state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransfer {
    pub inputs: Vec<NoteHash>,
    pub outputs: Vec<Note>,
}

pub trait ProofValidator {
    fn validate(
        &self,
        asset: &AssetId,
        proof: &[u8],
        sender: &Address,
    ) -> Result<ValidatedTransfer, ProofError>;
}

/// Validates encoded [`JoinSplitProof`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinSplitValidator;

impl ProofValidator for JoinSplitValidator {
    fn validate(
        &self,
        asset: &AssetId,
        proof: &[u8],
        sender: &Address,
    ) -> Result<ValidatedTransfer, ProofError> {
        let proof =
            JoinSplitProof::decode(proof).map_err(|e| ProofError::Malformed(e.to_string()))?;

        if proof.asset != *asset {
            return Err(ProofError::AssetMismatch {
                expected: *asset,
                found: proof.asset,
            });
        }
        if proof.sender != *sender {
            return Err(ProofError::SenderMismatch {
                expected: *sender,
                found: proof.sender,
            });
        }
        if proof.inputs.is_empty() {
            return Err(ProofError::NoInputs);
        }
        if proof.inputs.len() > MAX_INPUTS {
            return Err(ProofError::TooManyInputs(proof.inputs.len()));
        }
        if proof.outputs.len() > MAX_OUTPUTS {
            return Err(ProofError::TooManyOutputs(proof.outputs.len()));
        }
        if !proof.has_unique_notes() {
            return Err(ProofError::DuplicateNotes);
        }
        if !proof.is_balanced() {
            return Err(ProofError::Unbalanced);
        }

        Ok(ValidatedTransfer {
            inputs: proof.input_hashes(),
            outputs: proof.outputs,
        })
    }
}
