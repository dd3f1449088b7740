use curve25519_dalek::ristretto::RistrettoPoint;
use sha2::{Digest, Sha512};

pub fn hash_to_curve(bytes: &[u8]) -> RistrettoPoint {
    let hasher = Sha512::new()
        .chain_update(b"NOMOS_CL_HASH_TO_CURVE")
        .chain_update(bytes);
    RistrettoPoint::from_hash(hasher)
}
