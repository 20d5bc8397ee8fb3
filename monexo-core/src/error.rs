use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("secp256k1 error: {0}")]
    Secp256k1(#[from] secp256k1::Error),

    #[error("hash-to-curve did not converge after {0} iterations")]
    HashToCurveExhausted(u32),

    #[error("amount {0} is not representable as distinct powers of two below 2^20")]
    InvalidDenomination(u64),

    #[error("amount {0} is not a positive integer below 2^32")]
    InvalidAmount(i64),
}
