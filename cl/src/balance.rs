use std::{
    iter::Sum,
    ops::{Add, Neg, Sub},
};

use curve25519_dalek::{ristretto::RistrettoPoint, traits::Identity, Scalar};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

/// A Pedersen commitment to a note value: `value * Unit + blinding * G`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Balance(pub RistrettoPoint);

pub type Value = u64;
pub type Unit = RistrettoPoint;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct BalanceWitness(pub Scalar);

impl Balance {
    /// A commitment to zero, blinded by the provided balance witness
    pub fn zero(blinding: BalanceWitness) -> Self {
        // With value=0 the commitment is unitless, any point works as the unit.
        let unit = curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
        Self(balance(0, unit, blinding.0))
    }

    pub fn identity() -> Self {
        Self(RistrettoPoint::identity())
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }
}

impl Add for Balance {
    type Output = Balance;

    fn add(self, rhs: Balance) -> Balance {
        Balance(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Balance;

    fn sub(self, rhs: Balance) -> Balance {
        Balance(self.0 - rhs.0)
    }
}

impl<'a> Sum<&'a Balance> for Balance {
    fn sum<I: Iterator<Item = &'a Balance>>(iter: I) -> Balance {
        iter.fold(Balance::identity(), |acc, b| acc + *b)
    }
}

impl BalanceWitness {
    pub fn new(blinding: Scalar) -> Self {
        Self(blinding)
    }

    pub fn unblinded() -> Self {
        Self::new(Scalar::ZERO)
    }

    pub fn random(mut rng: impl CryptoRngCore) -> Self {
        Self::new(Scalar::random(&mut rng))
    }

    pub fn commit(&self, value: Value, unit: Unit) -> Balance {
        Balance(balance(value, unit, self.0))
    }
}

impl Add for BalanceWitness {
    type Output = BalanceWitness;

    fn add(self, rhs: BalanceWitness) -> BalanceWitness {
        BalanceWitness(self.0 + rhs.0)
    }
}

impl Sub for BalanceWitness {
    type Output = BalanceWitness;

    fn sub(self, rhs: BalanceWitness) -> BalanceWitness {
        BalanceWitness(self.0 - rhs.0)
    }
}

impl Neg for BalanceWitness {
    type Output = BalanceWitness;

    fn neg(self) -> BalanceWitness {
        BalanceWitness(-self.0)
    }
}

impl<'a> Sum<&'a BalanceWitness> for BalanceWitness {
    fn sum<I: Iterator<Item = &'a BalanceWitness>>(iter: I) -> BalanceWitness {
        iter.fold(BalanceWitness::unblinded(), |acc, b| acc + *b)
    }
}

pub fn balance(value: u64, unit: Unit, blinding: Scalar) -> Unit {
    let value_scalar = Scalar::from(value);
    RistrettoPoint::vartime_double_scalar_mul_basepoint(&value_scalar, &unit, &blinding)
}
