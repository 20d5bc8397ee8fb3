//! Named point/scalar operations on secp256k1, per the contract in the BDHKE
//! protocol: addition, negation, subtraction and scalar multiplication.
//! `secp256k1::PublicKey`'s `PartialEq` already compares serialized points in
//! constant time, so equality needs no wrapper here.

use secp256k1::{PublicKey, Scalar, SecretKey, SECP256K1};

use crate::error::CoreError;

/// `P + Q`.
pub fn point_add(p: &PublicKey, q: &PublicKey) -> Result<PublicKey, CoreError> {
    Ok(p.combine(q)?)
}

/// `-P` (flip the sign of y).
pub fn point_negate(p: &PublicKey) -> PublicKey {
    p.negate(SECP256K1)
}

/// `P - Q`.
pub fn point_sub(p: &PublicKey, q: &PublicKey) -> Result<PublicKey, CoreError> {
    point_add(p, &point_negate(q))
}

/// `k * P`.
pub fn scalar_mul(p: &PublicKey, k: &SecretKey) -> Result<PublicKey, CoreError> {
    let scalar = Scalar::from(*k);
    Ok(p.mul_tweak(SECP256K1, &scalar)?)
}

/// The secp256k1 generator `G`, i.e. the public key for the scalar `1`.
pub fn generator() -> PublicKey {
    SecretKey::from_slice(&[
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 1,
    ])
    .expect("1 is a valid scalar")
    .public_key(SECP256K1)
}

/// A fresh scalar drawn uniformly from `[1, n)` using the OS CSPRNG.
pub fn random_scalar() -> SecretKey {
    SecretKey::new(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn add_negate_is_identity_on_serialization() {
        let a = random_scalar().public_key(SECP256K1);
        let b = random_scalar().public_key(SECP256K1);

        let sum = point_add(&a, &b).unwrap();
        let back = point_sub(&sum, &b).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn scalar_mul_commutes() {
        let a = random_scalar();
        let b = random_scalar();
        let p = random_scalar().public_key(SECP256K1);

        let ab = scalar_mul(&scalar_mul(&p, &a).unwrap(), &b).unwrap();
        let ba = scalar_mul(&scalar_mul(&p, &b).unwrap(), &a).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn generator_matches_scalar_one() {
        let g = generator();
        let one = SecretKey::from_slice(&[
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 1,
        ])
        .unwrap();
        assert_eq!(g, one.public_key(SECP256K1));
    }
}
