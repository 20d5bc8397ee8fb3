//! Wire request/response shapes for the mint's HTTP surface. Points are
//! serialized as compressed SEC1 hex strings via `secp256k1`'s own
//! `serde` support, so these types need no custom (de)serialization.

use std::collections::HashMap;

use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};

use crate::blind::{BlindedMessage, BlindedSignature};
use crate::proof::Proofs;

/// `GET /keys` response: the mint's public key for every denomination it
/// currently signs for.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeysResponse {
    pub keys: HashMap<u64, PublicKey>,
}

/// `POST /mint` request: a single blinded output for the fixed mint amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMintRequest {
    #[serde(rename = "B_")]
    pub b_: PublicKey,
}

/// `POST /mint` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMintResponse {
    #[serde(rename = "C_")]
    pub c_: PublicKey,
}

/// `POST /split` request: the proofs being spent and the blinded outputs to
/// sign in their place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSplitRequest {
    pub proofs: Proofs,
    pub amount: i64,
    pub output_data: Vec<BlindedMessage>,
}

/// `POST /split` response: the change outputs followed by the requested
/// split amount's outputs, in the order `decompose(total - amount) ++
/// decompose(amount)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSplitResponse {
    pub fst: Vec<BlindedSignature>,
    pub snd: Vec<BlindedSignature>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_keys_response_serializes_to_empty_object() {
        let response = KeysResponse::default();
        let serialized = serde_json::to_string(&response).unwrap();
        assert_eq!(serialized, "{\"keys\":{}}");
    }
}
