pub mod address;
pub mod asset;
pub mod balance;
pub mod crypto;
pub mod join_split;
pub mod note;

pub use address::Address;
pub use asset::AssetId;
pub use balance::{Balance, BalanceWitness, Unit, Value};
pub use join_split::{JoinSplitProof, JoinSplitWitness, MAX_INPUTS, MAX_OUTPUTS};
pub use note::{Nonce, Note, NoteHash, NoteWitness};
