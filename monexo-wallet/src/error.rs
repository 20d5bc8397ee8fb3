use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error(transparent)]
    Core(#[from] monexo_core::error::CoreError),

    #[error("http request to mint failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid mint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("could not parse response from mint: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    MintError(String),

    #[error("not enough proofs to cover amount {0}")]
    NotEnoughTokens(u64),

    #[error("mint has no key for denomination {0}")]
    PubkeyNotFound(u64),
}
