//! A [`Proof`] is what a wallet holds and spends: a promise the wallet has
//! already unblinded, together with the secret message it was issued for.

use std::collections::HashSet;

use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};

use crate::blind::TotalAmount;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proof {
    pub amount: u64,
    #[serde(rename = "C")]
    pub c: PublicKey,
    pub secret_msg: String,
}

pub type Proofs = Vec<Proof>;

impl TotalAmount for Proofs {
    fn total_amount(&self) -> u64 {
        self.iter().fold(0, |acc, p| acc + p.amount)
    }
}

impl TotalAmount for [Proof] {
    fn total_amount(&self) -> u64 {
        self.iter().fold(0, |acc, p| acc + p.amount)
    }
}

/// True if any `secret_msg` appears more than once among `proofs`.
pub fn has_duplicate_secrets(proofs: &[Proof]) -> bool {
    let mut seen = HashSet::with_capacity(proofs.len());
    !proofs.iter().all(|p| seen.insert(p.secret_msg.as_str()))
}
