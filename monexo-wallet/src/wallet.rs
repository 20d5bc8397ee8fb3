//! The wallet: holds proofs in memory, blinds outputs, and talks to a mint
//! over a [`CashuClient`].

use std::collections::HashMap;

use monexo_core::amount::decompose;
use monexo_core::blind::{BlindedMessage, TotalAmount};
use monexo_core::dhke;
use monexo_core::primitives::{PostMintRequest, PostSplitRequest};
use monexo_core::proof::{Proof, Proofs};
use rand::Rng;
use secp256k1::PublicKey;
use tracing::instrument;
use url::Url;

use crate::client::crossplatform::CrossPlatformHttpClient;
use crate::client::CashuClient;
use crate::error::WalletError;

/// The amount `mint()` always issues; matches the mint's own fixed policy.
const MINT_DENOMINATION: u64 = 64;

/// A random 128-bit decimal string, used as a fresh `secret_msg` for every
/// blinded output.
fn random_secret() -> String {
    rand::thread_rng().gen::<u128>().to_string()
}

/// A wallet tied to a single mint: its public keyset is fetched once on
/// construction and cached, and spent proofs are retired from the local
/// store only once the mint has confirmed a split.
pub struct Wallet<C: CashuClient = CrossPlatformHttpClient> {
    client: C,
    mint_url: Url,
    public_keys: HashMap<u64, PublicKey>,
    proofs: Proofs,
}

impl Wallet<CrossPlatformHttpClient> {
    pub async fn new(mint_url: Url) -> Result<Self, WalletError> {
        Self::with_client(mint_url, CrossPlatformHttpClient::new()).await
    }
}

impl<C: CashuClient> Wallet<C> {
    pub async fn with_client(mint_url: Url, client: C) -> Result<Self, WalletError> {
        let public_keys = client.get_keys(&mint_url).await?.keys;
        Ok(Self {
            client,
            mint_url,
            public_keys,
            proofs: Vec::new(),
        })
    }

    pub fn proofs(&self) -> &Proofs {
        &self.proofs
    }

    pub fn balance(&self) -> u64 {
        self.proofs.total_amount()
    }

    fn key_for(&self, amount: u64) -> Result<&PublicKey, WalletError> {
        self.public_keys
            .get(&amount)
            .ok_or(WalletError::PubkeyNotFound(amount))
    }

    /// Requests a fresh blinded proof from the mint and adds it to the local
    /// store.
    #[instrument(level = "debug", skip(self))]
    pub async fn mint(&mut self) -> Result<Proof, WalletError> {
        let secret_msg = random_secret();
        let (b_, r) = dhke::blind(secret_msg.as_bytes())?;

        let response = self
            .client
            .post_mint(&self.mint_url, PostMintRequest { b_ })
            .await?;

        let key = self.key_for(MINT_DENOMINATION)?;
        let c = dhke::unblind(&response.c_, &r, key)?;

        let proof = Proof {
            amount: MINT_DENOMINATION,
            c,
            secret_msg,
        };
        self.proofs.push(proof.clone());
        Ok(proof)
    }

    /// Splits `proofs` (which must belong to the local store) into a change
    /// part worth `total - amount` and a requested part worth `amount`.
    ///
    /// The local store is only updated once the mint has confirmed the
    /// split; on any error it is left untouched.
    #[instrument(level = "debug", skip(self, proofs))]
    pub async fn split(
        &mut self,
        proofs: Proofs,
        amount: i64,
    ) -> Result<(Proofs, Proofs), WalletError> {
        let total = proofs.total_amount();

        let (outs_fst, outs_snd) = match u64::try_from(amount) {
            Ok(amount) if amount <= total => (
                decompose(total - amount).unwrap_or_default(),
                decompose(amount).unwrap_or_default(),
            ),
            _ => (Vec::new(), Vec::new()),
        };

        let mut secrets = Vec::with_capacity(outs_fst.len() + outs_snd.len());
        let mut blinding_factors = Vec::with_capacity(secrets.capacity());
        let mut output_data = Vec::with_capacity(secrets.capacity());

        for denomination in outs_fst.iter().chain(outs_snd.iter()) {
            let secret_msg = random_secret();
            let (b_, r) = dhke::blind(secret_msg.as_bytes())?;
            output_data.push(BlindedMessage {
                amount: *denomination,
                b_,
            });
            secrets.push(secret_msg);
            blinding_factors.push(r);
        }

        let response = self
            .client
            .post_split(
                &self.mint_url,
                PostSplitRequest {
                    proofs: proofs.clone(),
                    amount,
                    output_data,
                },
            )
            .await?;

        let fst_len = response.fst.len();
        let mut new_proofs = Vec::with_capacity(fst_len + response.snd.len());
        for (signature, (secret_msg, r)) in response
            .fst
            .iter()
            .chain(response.snd.iter())
            .zip(secrets.iter().zip(blinding_factors.iter()))
        {
            let key = self.key_for(signature.amount)?;
            let c = dhke::unblind(&signature.c_, r, key)?;
            new_proofs.push(Proof {
                amount: signature.amount,
                c,
                secret_msg: secret_msg.clone(),
            });
        }

        let spent_secrets: std::collections::HashSet<&str> =
            proofs.iter().map(|p| p.secret_msg.as_str()).collect();
        self.proofs
            .retain(|p| !spent_secrets.contains(p.secret_msg.as_str()));

        let snd = new_proofs.split_off(fst_len);
        let fst = new_proofs;

        self.proofs.extend(fst.iter().cloned());
        self.proofs.extend(snd.iter().cloned());

        Ok((fst, snd))
    }
}

#[cfg(test)]
mod tests {
    use monexo_core::blind::BlindedSignature;
    use monexo_core::keyset::MintKeyset;
    use monexo_core::primitives::{KeysResponse, PostMintResponse, PostSplitResponse};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::MockCashuClient;

    const MASTER_SECRET: &str = "supersecretprivatekey";

    fn test_mint_url() -> Url {
        Url::parse("http://localhost:3338").unwrap()
    }

    async fn wallet_with_keys(client: MockCashuClient) -> Wallet<MockCashuClient> {
        Wallet::with_client(test_mint_url(), client).await.unwrap()
    }

    fn keyset() -> MintKeyset {
        MintKeyset::derive(MASTER_SECRET).unwrap()
    }

    #[tokio::test]
    async fn mint_produces_a_verifiable_64_unit_proof() {
        let keyset = keyset();
        let mut client = MockCashuClient::new();

        let keys = keyset.public_keys().clone();
        client
            .expect_get_keys()
            .returning(move |_| Ok(KeysResponse { keys: keys.clone() }));

        client.expect_post_mint().returning(move |_, request| {
            let private_key = keyset.private_key_for(MINT_DENOMINATION).unwrap();
            let c_ = dhke::sign(&request.b_, private_key).unwrap();
            Ok(PostMintResponse { c_ })
        });

        let mut wallet = wallet_with_keys(client).await;
        let proof = wallet.mint().await.unwrap();

        assert_eq!(proof.amount, 64);
        assert_eq!(wallet.balance(), 64);
        assert_eq!(wallet.proofs().len(), 1);
    }

    #[tokio::test]
    async fn split_into_change_and_requested_amount() {
        let keyset = keyset();
        let mut client = MockCashuClient::new();

        let keys = keyset.public_keys().clone();
        client
            .expect_get_keys()
            .returning(move |_| Ok(KeysResponse { keys: keys.clone() }));

        let mint_keyset = keyset.clone();
        client.expect_post_split().returning(move |_, request| {
            let fst = vec![4u64, 8, 32];
            let snd = vec![4u64, 16];

            let promises: Vec<BlindedSignature> = request
                .output_data
                .iter()
                .map(|o| {
                    let private_key = mint_keyset.private_key_for(o.amount).unwrap();
                    let c_ = dhke::sign(&o.b_, private_key).unwrap();
                    BlindedSignature {
                        amount: o.amount,
                        c_,
                    }
                })
                .collect();

            let (fst_out, snd_out) = promises.split_at(fst.len());
            assert_eq!(fst_out.iter().map(|p| p.amount).collect::<Vec<_>>(), fst);
            assert_eq!(snd_out.iter().map(|p| p.amount).collect::<Vec<_>>(), snd);

            Ok(PostSplitResponse {
                fst: fst_out.to_vec(),
                snd: snd_out.to_vec(),
            })
        });

        let mut wallet = wallet_with_keys(client).await;
        let proof = Proof {
            amount: 64,
            c: keyset
                .public_key_for(64)
                .copied()
                .unwrap(),
            secret_msg: "s4-secret".to_owned(),
        };
        wallet.proofs.push(proof.clone());

        let (fst, snd) = wallet.split(vec![proof], 20).await.unwrap();
        assert_eq!(fst.iter().map(|p| p.amount).collect::<Vec<_>>(), vec![4, 8, 32]);
        assert_eq!(snd.iter().map(|p| p.amount).collect::<Vec<_>>(), vec![4, 16]);
        assert_eq!(wallet.balance(), 64);
    }

    #[tokio::test]
    async fn split_exceeding_total_leaves_local_store_untouched() {
        let keyset = keyset();
        let mut client = MockCashuClient::new();

        let keys = keyset.public_keys().clone();
        client
            .expect_get_keys()
            .returning(move |_| Ok(KeysResponse { keys: keys.clone() }));

        client.expect_post_split().returning(|_, _| {
            Err(WalletError::MintError(
                "Split amount is higher than the total sum".to_owned(),
            ))
        });

        let mut wallet = wallet_with_keys(client).await;
        let proof = Proof {
            amount: 64,
            c: keyset.public_key_for(64).copied().unwrap(),
            secret_msg: "s2-secret".to_owned(),
        };
        wallet.proofs.push(proof.clone());

        let err = wallet.split(vec![proof], 65).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Split amount is higher than the total sum"
        );
        assert_eq!(wallet.balance(), 64);
    }

    #[tokio::test]
    async fn negative_split_amount_surfaces_the_mints_message() {
        let keyset = keyset();
        let mut client = MockCashuClient::new();

        let keys = keyset.public_keys().clone();
        client
            .expect_get_keys()
            .returning(move |_| Ok(KeysResponse { keys: keys.clone() }));

        client.expect_post_split().returning(|_, request| {
            assert!(request.output_data.is_empty());
            Err(WalletError::MintError(
                "Invalid split amount: -500".to_owned(),
            ))
        });

        let mut wallet = wallet_with_keys(client).await;
        let proof1 = Proof {
            amount: 1,
            c: keyset.public_key_for(1).copied().unwrap(),
            secret_msg: "s7-a".to_owned(),
        };
        let proof2 = Proof {
            amount: 4,
            c: keyset.public_key_for(4).copied().unwrap(),
            secret_msg: "s7-b".to_owned(),
        };

        let err = wallet.split(vec![proof1, proof2], -500).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid split amount: -500");
    }
}
