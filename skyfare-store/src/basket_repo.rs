use async_trait::async_trait;
use skyfare_core::repository::BasketStore;
use skyfare_core::{StoreError, StoreResult};
use skyfare_shared::models::{BasketDraft, BasketItem};
use tracing::info;

use crate::rest::RestClient;

/// Booking drafts against the hosted basket collection.
pub struct RestBasketStore {
    client: RestClient,
}

impl RestBasketStore {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BasketStore for RestBasketStore {
    async fn list(&self) -> StoreResult<Vec<BasketItem>> {
        match self.client.get_json("basket", &[]).await {
            Ok(items) => Ok(items),
            Err(StoreError::NotFound) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    async fn get(&self, id: &str) -> StoreResult<BasketItem> {
        self.client.get_json(&format!("basket/{id}"), &[]).await
    }

    async fn create(&self, draft: &BasketDraft) -> StoreResult<BasketItem> {
        let item: BasketItem = self.client.post_json("basket", draft).await?;
        info!("basket item {} created for uid {}", item.id, item.uid);
        Ok(item)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.client.delete(&format!("basket/{id}")).await
    }
}
