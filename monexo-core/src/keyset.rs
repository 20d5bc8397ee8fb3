//! Deterministic per-denomination key derivation for the mint.
//!
//! `k_i = int(hex_ascii(SHA-256(str(master_secret) ++ str(i))), 16) mod n`
//! for each of the mint's supported denominations `2^i`. This derivation
//! must be reproduced exactly for wire interoperability; see the module
//! docs on [`crate::dhke`] for why `hash_to_curve` carries no such
//! constraint.

use std::collections::HashMap;

use bitcoin_hashes::{sha256, Hash};
use num_bigint::BigUint;
use secp256k1::{PublicKey, SecretKey, SECP256K1};
use tracing::instrument;

use crate::amount::DENOMINATION_COUNT;
use crate::error::CoreError;

/// The secp256k1 group order `n`.
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// The mint's derived signing keys, one scalar per denomination.
#[derive(Clone)]
pub struct MintKeyset {
    private_keys: HashMap<u64, SecretKey>,
    public_keys: HashMap<u64, PublicKey>,
}

impl MintKeyset {
    #[instrument(level = "debug", skip(master_secret))]
    pub fn derive(master_secret: &str) -> Result<Self, CoreError> {
        let mut private_keys = HashMap::with_capacity(DENOMINATION_COUNT as usize);
        let mut public_keys = HashMap::with_capacity(DENOMINATION_COUNT as usize);

        for i in 0..DENOMINATION_COUNT {
            let denomination = 1u64 << i;
            let scalar = derive_scalar(master_secret, i)?;
            public_keys.insert(denomination, scalar.public_key(SECP256K1));
            private_keys.insert(denomination, scalar);
        }

        Ok(Self {
            private_keys,
            public_keys,
        })
    }

    pub fn private_key_for(&self, denomination: u64) -> Option<&SecretKey> {
        self.private_keys.get(&denomination)
    }

    pub fn public_key_for(&self, denomination: u64) -> Option<&PublicKey> {
        self.public_keys.get(&denomination)
    }

    pub fn public_keys(&self) -> &HashMap<u64, PublicKey> {
        &self.public_keys
    }
}

fn derive_scalar(master_secret: &str, i: u32) -> Result<SecretKey, CoreError> {
    let preimage = format!("{master_secret}{i}");
    let digest = sha256::Hash::hash(preimage.as_bytes());

    let order = BigUint::from_bytes_be(&CURVE_ORDER);
    let reduced = BigUint::from_bytes_be(digest.as_byte_array()) % order;

    let mut bytes = [0u8; 32];
    let be = reduced.to_bytes_be();
    bytes[32 - be.len()..].copy_from_slice(&be);

    Ok(SecretKey::from_slice(&bytes)?)
}
