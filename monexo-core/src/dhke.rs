//! The blind Diffie-Hellman key exchange: the four-step blind-signature
//! scheme the mint and wallet run to issue and verify tokens without the
//! mint learning which output corresponds to which input.
//!
//! `hash_to_curve` here is try-and-increment, not a NUMS construction: the
//! mint can compute the discrete log of `Y` relative to `G`. That is a
//! documented weakness of this scheme, not a defect in this implementation.

use bitcoin_hashes::{sha256, Hash};
use secp256k1::{PublicKey, SecretKey};

use crate::curve;
use crate::error::CoreError;

const HASH_TO_CURVE_MAX_ITERATIONS: u32 = 10_000;

/// Try-and-increment hash-to-curve: interpret `SHA-256(msg)` as the
/// x-coordinate of a point with even y; if that is not a valid point,
/// rehash and retry.
pub fn hash_to_curve(msg: &[u8]) -> Result<PublicKey, CoreError> {
    let mut current = sha256::Hash::hash(msg).to_byte_array();

    for _ in 0..HASH_TO_CURVE_MAX_ITERATIONS {
        let mut candidate = [0u8; 33];
        candidate[0] = 0x02;
        candidate[1..].copy_from_slice(&current);

        match PublicKey::from_slice(&candidate) {
            Ok(point) => return Ok(point),
            Err(_) => current = sha256::Hash::hash(&current).to_byte_array(),
        }
    }

    Err(CoreError::HashToCurveExhausted(HASH_TO_CURVE_MAX_ITERATIONS))
}

/// Wallet step: `Y = hash_to_curve(secret_msg)`, draw `r`, return
/// `(B_ = Y + r*G, r)`.
pub fn blind(secret_msg: &[u8]) -> Result<(PublicKey, SecretKey), CoreError> {
    let y = hash_to_curve(secret_msg)?;
    let r = curve::random_scalar();
    let b_ = curve::point_add(&y, &r.public_key(secp256k1::SECP256K1))?;
    Ok((b_, r))
}

/// Mint step: `C_ = a * B_`.
pub fn sign(blinded_message: &PublicKey, mint_privkey: &SecretKey) -> Result<PublicKey, CoreError> {
    curve::scalar_mul(blinded_message, mint_privkey)
}

/// Wallet step: `C = C_ - r*A`.
pub fn unblind(
    blinded_signature: &PublicKey,
    r: &SecretKey,
    mint_pubkey: &PublicKey,
) -> Result<PublicKey, CoreError> {
    let r_a = curve::scalar_mul(mint_pubkey, r)?;
    curve::point_sub(blinded_signature, &r_a)
}

/// Mint step: `C == a * hash_to_curve(secret_msg)`.
pub fn verify(mint_privkey: &SecretKey, c: &PublicKey, secret_msg: &[u8]) -> Result<bool, CoreError> {
    let y = hash_to_curve(secret_msg)?;
    let expected = curve::scalar_mul(&y, mint_privkey)?;
    Ok(&expected == c)
}
