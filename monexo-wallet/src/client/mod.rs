pub mod crossplatform;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use monexo_core::primitives::{
    KeysResponse, PostMintRequest, PostMintResponse, PostSplitRequest, PostSplitResponse,
};
use url::Url;

use crate::error::WalletError;

#[cfg_attr(test, automock)]
#[async_trait(?Send)]
pub trait CashuClient {
    async fn get_keys(&self, mint_url: &Url) -> Result<KeysResponse, WalletError>;

    async fn post_mint(
        &self,
        mint_url: &Url,
        request: PostMintRequest,
    ) -> Result<PostMintResponse, WalletError>;

    async fn post_split(
        &self,
        mint_url: &Url,
        request: PostSplitRequest,
    ) -> Result<PostSplitResponse, WalletError>;
}
