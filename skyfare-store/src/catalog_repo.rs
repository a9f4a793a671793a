use async_trait::async_trait;
use skyfare_core::repository::TicketCatalog;
use skyfare_core::{StoreError, StoreResult};
use skyfare_shared::models::{SpecialOffer, Ticket};

use crate::rest::RestClient;

/// Ticket and special-offer reads against the hosted catalog collections.
pub struct RestTicketCatalog {
    client: RestClient,
}

impl RestTicketCatalog {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TicketCatalog for RestTicketCatalog {
    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>> {
        // The mock API answers an empty collection with 404.
        match self.client.get_json("tickets", &[]).await {
            Ok(tickets) => Ok(tickets),
            Err(StoreError::NotFound) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    async fn get_ticket(&self, id: &str) -> StoreResult<Ticket> {
        self.client.get_json(&format!("tickets/{id}"), &[]).await
    }

    async fn special_offers(&self) -> StoreResult<Vec<SpecialOffer>> {
        match self.client.get_json("special_offers", &[]).await {
            Ok(offers) => Ok(offers),
            Err(StoreError::NotFound) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }
}
