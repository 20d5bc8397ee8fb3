use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{event, Level};

#[derive(Error, Debug)]
pub enum MintError {
    #[error(transparent)]
    Core(#[from] monexo_core::error::CoreError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    #[error("Invalid split amount: {0}")]
    InvalidSplitAmount(i64),

    #[error("Already spent. Secret msg:{0}")]
    AlreadySpent(String),

    #[error("Duplicate proofs or promises.")]
    DuplicateProofsOrPromises,

    #[error("Split amount is higher than the total sum")]
    SplitExceedsTotal,

    #[error("Split of promises is not as expected.")]
    UnexpectedSplitLayout,

    /// Resolves the open question in the protocol around single-proof
    /// verification failure: rather than an opaque falsy result, a failing
    /// proof is reported by its own secret_msg.
    #[error("Invalid proof. Secret msg:{0}")]
    InvalidProof(String),

    #[error("amount {0} has no key in this mint's keyset")]
    UnknownDenomination(u64),
}

impl IntoResponse for MintError {
    fn into_response(self) -> Response {
        event!(Level::WARN, "rejecting mint request: {}", self);

        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::OK, body).into_response()
    }
}
