pub mod error;
pub mod ledger;
pub mod registry;
pub mod shared;
pub mod validator;

pub use error::{Error, Result};
pub use ledger::{LedgerEvent, NoteLedger, Receipt, ZkLedger};
pub use registry::{NoteRecord, NoteStatus};
pub use shared::SharedLedger;
pub use validator::{JoinSplitValidator, ProofError, ProofValidator, ValidatedTransfer};
