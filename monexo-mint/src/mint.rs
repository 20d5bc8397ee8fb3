use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use monexo_core::amount::{decompose, validate_amount};
use monexo_core::blind::{BlindedMessage, BlindedSignature, TotalAmount};
use monexo_core::dhke;
use monexo_core::keyset::MintKeyset;
use monexo_core::proof::{has_duplicate_secrets, Proofs};
use secp256k1::PublicKey;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::MintError;

/// `mint()` always issues this many units; see the open question on whether
/// this is a placeholder or a fixed policy.
const MINT_DENOMINATION: u64 = 64;

/// The mint's in-process state: an immutable keyset derived once at startup
/// and an append-only set of spent `secret_msg` values guarded by a single
/// mutex for the duration of a split's critical section.
#[derive(Clone)]
pub struct Mint {
    keyset: Arc<MintKeyset>,
    spent: Arc<Mutex<HashSet<String>>>,
}

impl Mint {
    pub fn new(master_secret: &str) -> Result<Self, MintError> {
        Ok(Self {
            keyset: Arc::new(MintKeyset::derive(master_secret)?),
            spent: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Read-only on immutable state; no locking required.
    pub fn get_pubkeys(&self) -> HashMap<u64, PublicKey> {
        self.keyset.public_keys().clone()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn mint(&self, b_: PublicKey) -> Result<BlindedSignature, MintError> {
        let private_key = self
            .keyset
            .private_key_for(MINT_DENOMINATION)
            .ok_or(MintError::UnknownDenomination(MINT_DENOMINATION))?;

        let c_ = dhke::sign(&b_, private_key)?;
        Ok(BlindedSignature {
            amount: MINT_DENOMINATION,
            c_,
        })
    }

    #[instrument(level = "debug", skip(self, proofs, output_data), err)]
    pub async fn split(
        &self,
        proofs: &Proofs,
        amount: i64,
        output_data: &[BlindedMessage],
    ) -> Result<(Vec<BlindedSignature>, Vec<BlindedSignature>), MintError> {
        let amount =
            validate_amount(amount).map_err(|_| MintError::InvalidSplitAmount(amount))?;

        let mut spent = self.spent.lock().await;

        for p in proofs {
            if spent.contains(&p.secret_msg) {
                return Err(MintError::AlreadySpent(p.secret_msg.clone()));
            }

            let private_key = self
                .keyset
                .private_key_for(p.amount)
                .ok_or(MintError::UnknownDenomination(p.amount))?;

            if !dhke::verify(private_key, &p.c, p.secret_msg.as_bytes())? {
                return Err(MintError::InvalidProof(p.secret_msg.clone()));
            }
        }

        let total = proofs.total_amount();

        if has_duplicate_secrets(proofs) || has_duplicate_blinded_points(output_data) {
            return Err(MintError::DuplicateProofsOrPromises);
        }

        if amount > total {
            return Err(MintError::SplitExceedsTotal);
        }

        let outs_fst = decompose(total - amount)?;
        let outs_snd = decompose(amount)?;

        let expected = outs_fst.iter().chain(outs_snd.iter()).copied();
        let actual = output_data.iter().map(|o| o.amount);
        if !expected.eq(actual) {
            return Err(MintError::UnexpectedSplitLayout);
        }

        for p in proofs.iter() {
            spent.insert(p.secret_msg.clone());
        }

        let mut promises = Vec::with_capacity(output_data.len());
        for out in output_data {
            let private_key = self
                .keyset
                .private_key_for(out.amount)
                .ok_or(MintError::UnknownDenomination(out.amount))?;
            let c_ = dhke::sign(&out.b_, private_key)?;
            promises.push(BlindedSignature {
                amount: out.amount,
                c_,
            });
        }

        let snd = promises.split_off(outs_fst.len());
        let fst = promises;

        debug_assert_eq!(fst.total_amount() + snd.total_amount(), total);

        Ok((fst, snd))
    }
}

fn has_duplicate_blinded_points(outputs: &[BlindedMessage]) -> bool {
    let mut seen = HashSet::with_capacity(outputs.len());
    !outputs.iter().all(|o| seen.insert(o.b_.serialize()))
}

#[cfg(test)]
mod tests {
    use monexo_core::dhke;
    use monexo_core::proof::Proof;
    use pretty_assertions::assert_eq;

    use super::*;

    const MASTER_SECRET: &str = "supersecretprivatekey";

    fn blind_output(secret_msg: &str) -> (BlindedMessage, secp256k1::SecretKey) {
        let (b_, r) = dhke::blind(secret_msg.as_bytes()).unwrap();
        (
            BlindedMessage {
                amount: 0,
                b_,
            },
            r,
        )
    }

    async fn mint_a_proof(mint: &Mint, secret_msg: &str) -> Proof {
        let (b_, r) = dhke::blind(secret_msg.as_bytes()).unwrap();
        let promise = mint.mint(b_).unwrap();
        let pubkey = mint.keyset.public_key_for(MINT_DENOMINATION).unwrap();
        let c = dhke::unblind(&promise.c_, &r, pubkey).unwrap();
        Proof {
            amount: MINT_DENOMINATION,
            c,
            secret_msg: secret_msg.to_owned(),
        }
    }

    #[tokio::test]
    async fn mint_issues_64_units() {
        let mint = Mint::new(MASTER_SECRET).unwrap();
        let proof = mint_a_proof(&mint, "s1-secret").await;
        assert_eq!(proof.amount, 64);

        let private_key = mint.keyset.private_key_for(64).unwrap();
        assert!(dhke::verify(private_key, &proof.c, proof.secret_msg.as_bytes()).unwrap());
    }

    #[tokio::test]
    async fn split_rejects_amount_above_total() {
        let mint = Mint::new(MASTER_SECRET).unwrap();
        let proof = mint_a_proof(&mint, "s2-secret").await;

        let result = mint.split(&vec![proof], 65, &[]).await;
        assert!(matches!(result, Err(MintError::SplitExceedsTotal)));
    }

    #[tokio::test]
    async fn split_rejects_duplicate_inputs() {
        let mint = Mint::new(MASTER_SECRET).unwrap();
        let proof = mint_a_proof(&mint, "s3-secret").await;

        let result = mint.split(&vec![proof.clone(), proof], 20, &[]).await;
        assert!(matches!(result, Err(MintError::DuplicateProofsOrPromises)));
    }

    #[tokio::test]
    async fn split_partitions_into_fst_and_snd() {
        let mint = Mint::new(MASTER_SECRET).unwrap();
        let proof = mint_a_proof(&mint, "s4-secret").await;

        let mut outputs = Vec::new();
        let mut blinding = Vec::new();
        for denomination in [4u64, 8, 32, 4, 16] {
            let (mut bm, r) = blind_output(&format!("s4-out-{denomination}-{}", blinding.len()));
            bm.amount = denomination;
            outputs.push(bm);
            blinding.push(r);
        }

        let (fst, snd) = mint.split(&vec![proof], 20, &outputs).await.unwrap();
        assert_eq!(
            fst.iter().map(|p| p.amount).collect::<Vec<_>>(),
            vec![4, 8, 32]
        );
        assert_eq!(snd.iter().map(|p| p.amount).collect::<Vec<_>>(), vec![4, 16]);
    }

    #[tokio::test]
    async fn negative_split_amount_is_rejected() {
        let mint = Mint::new(MASTER_SECRET).unwrap();
        let proof1 = mint_a_proof(&mint, "s7-a").await;
        let proof2 = mint_a_proof(&mint, "s7-b").await;

        let result = mint.split(&vec![proof1, proof2], -500, &[]).await;
        assert!(matches!(result, Err(MintError::InvalidSplitAmount(-500))));
    }

    #[tokio::test]
    async fn replaying_a_committed_split_is_rejected() {
        let mint = Mint::new(MASTER_SECRET).unwrap();
        let proof = mint_a_proof(&mint, "s6-secret").await;

        let mut outputs = Vec::new();
        for denomination in [4u64, 8, 32, 4, 16] {
            let (mut bm, _r) = blind_output(&format!("s6-out-{denomination}"));
            bm.amount = denomination;
            outputs.push(bm);
        }

        mint.split(&vec![proof.clone()], 20, &outputs).await.unwrap();

        let replay = mint.split(&vec![proof], 20, &outputs).await;
        assert!(matches!(replay, Err(MintError::AlreadySpent(_))));
    }
}
