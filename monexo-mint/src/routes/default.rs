use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use monexo_core::blind::BlindedSignature;
use monexo_core::primitives::{
    KeysResponse, PostMintRequest, PostMintResponse, PostSplitRequest, PostSplitResponse,
};
use serde_json::json;
use tracing::instrument;

use crate::error::MintError;
use crate::mint::Mint;

#[instrument(skip(mint))]
pub async fn get_keys(State(mint): State<Mint>) -> Json<KeysResponse> {
    Json(KeysResponse {
        keys: mint.get_pubkeys(),
    })
}

#[instrument(skip(mint), err)]
pub async fn post_mint(
    State(mint): State<Mint>,
    Json(request): Json<PostMintRequest>,
) -> Result<Json<PostMintResponse>, MintError> {
    let promise = mint.mint(request.b_)?;
    Ok(Json(PostMintResponse { c_: promise.c_ }))
}

/// Split errors are conveyed in the response body with a 200 status, per the
/// mint's wire contract: an HTTP failure would conflate transport errors
/// with protocol rejections.
#[instrument(skip(mint, request), err)]
pub async fn post_split(
    State(mint): State<Mint>,
    Json(request): Json<PostSplitRequest>,
) -> Result<Json<PostSplitResponse>, MintError> {
    let (fst, snd): (Vec<BlindedSignature>, Vec<BlindedSignature>) = mint
        .split(&request.proofs, request.amount, &request.output_data)
        .await?;
    Ok(Json(PostSplitResponse { fst, snd }))
}

pub async fn get_health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
