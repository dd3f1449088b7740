use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::balance::Unit;

/// Identifies a confidential asset. Note hashes are only meaningful relative
/// to the asset they were registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    pub fn derive(name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"NOMOS_CL_ASSET");
        hasher.update(name.as_bytes());
        Self(hasher.finalize().into())
    }

    /// The point value commitments of this asset are taken over.
    pub fn unit(&self) -> Unit {
        crate::crypto::hash_to_curve(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 32]> for AssetId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.hex())
    }
}
