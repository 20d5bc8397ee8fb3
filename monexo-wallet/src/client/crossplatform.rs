use async_trait::async_trait;
use monexo_core::primitives::{
    KeysResponse, PostMintRequest, PostMintResponse, PostSplitRequest, PostSplitResponse,
};
use reqwest::{
    header::{HeaderValue, CONTENT_TYPE},
    Response,
};
use serde_json::Value;
use url::Url;

use crate::error::WalletError;

use super::CashuClient;

/// The wallet's HTTP transport to a mint, backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct CrossPlatformHttpClient {
    client: reqwest::Client,
}

impl CrossPlatformHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// The mint conveys protocol errors as a `200 OK` body `{"error": ...}`
    /// rather than as an HTTP failure status.
    async fn extract_response_data<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, WalletError> {
        let response_text = response.text().await?;

        if let Ok(value) = serde_json::from_str::<Value>(&response_text) {
            if let Some(error) = value.get("error").and_then(Value::as_str) {
                return Err(WalletError::MintError(error.to_owned()));
            }
        }

        Ok(serde_json::from_str::<T>(&response_text)?)
    }

    async fn do_get<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T, WalletError> {
        let resp = self.client.get(url.clone()).send().await?;
        Self::extract_response_data::<T>(resp).await
    }

    async fn do_post<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<T, WalletError> {
        let resp = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(serde_json::to_string(body)?)
            .send()
            .await?;
        Self::extract_response_data::<T>(resp).await
    }
}

#[async_trait(?Send)]
impl CashuClient for CrossPlatformHttpClient {
    async fn get_keys(&self, mint_url: &Url) -> Result<KeysResponse, WalletError> {
        self.do_get(&mint_url.join("keys")?).await
    }

    async fn post_mint(
        &self,
        mint_url: &Url,
        request: PostMintRequest,
    ) -> Result<PostMintResponse, WalletError> {
        self.do_post(&mint_url.join("mint")?, &request).await
    }

    async fn post_split(
        &self,
        mint_url: &Url,
        request: PostSplitRequest,
    ) -> Result<PostSplitResponse, WalletError> {
        self.do_post(&mint_url.join("split")?, &request).await
    }
}
