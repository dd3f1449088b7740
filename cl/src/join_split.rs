//! Join-split transfers: consume a set of input notes and produce a set of
//! output notes of the same asset, without revealing any value.
//!
//! The proof statement carries the public notes on both sides plus the
//! excess blinding `sum(r_in) - sum(r_out)`. Value is conserved iff
//! `sum(inputs) - sum(outputs) == excess * G`.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    address::Address,
    asset::AssetId,
    balance::{Balance, BalanceWitness},
    note::{Note, NoteHash, NoteWitness},
};

pub const MAX_INPUTS: usize = 8;
pub const MAX_OUTPUTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSplitWitness {
    pub inputs: Vec<NoteWitness>,
    pub outputs: Vec<NoteWitness>,
    /// The address the proof is bound to; only this address may present it.
    pub sender: Address,
}

impl JoinSplitWitness {
    pub fn new(inputs: Vec<NoteWitness>, outputs: Vec<NoteWitness>, sender: Address) -> Self {
        Self {
            inputs,
            outputs,
            sender,
        }
    }

    pub fn excess(&self) -> BalanceWitness {
        let r_in: BalanceWitness = self.inputs.iter().map(|n| &n.blinding).sum();
        let r_out: BalanceWitness = self.outputs.iter().map(|n| &n.blinding).sum();
        r_in - r_out
    }

    pub fn prove(&self, asset: &AssetId) -> JoinSplitProof {
        JoinSplitProof {
            asset: *asset,
            sender: self.sender,
            inputs: self.inputs.iter().map(|n| n.commit(asset)).collect(),
            outputs: self.outputs.iter().map(|n| n.commit(asset)).collect(),
            excess: self.excess(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSplitProof {
    pub asset: AssetId,
    pub sender: Address,
    pub inputs: Vec<Note>,
    pub outputs: Vec<Note>,
    pub excess: BalanceWitness,
}

impl JoinSplitProof {
    pub fn encode(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn decode(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }

    pub fn input_hashes(&self) -> Vec<NoteHash> {
        self.inputs.iter().map(Note::hash).collect()
    }

    pub fn output_hashes(&self) -> Vec<NoteHash> {
        self.outputs.iter().map(Note::hash).collect()
    }

    pub fn is_balanced(&self) -> bool {
        let inputs: Balance = self.inputs.iter().map(|n| &n.balance).sum();
        let outputs: Balance = self.outputs.iter().map(|n| &n.balance).sum();
        inputs - outputs == Balance::zero(self.excess)
    }

    pub fn has_unique_notes(&self) -> bool {
        self.input_hashes().into_iter().all_unique() && self.output_hashes().into_iter().all_unique()
    }
}
