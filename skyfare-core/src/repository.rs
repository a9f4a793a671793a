use async_trait::async_trait;
use skyfare_shared::models::{BasketDraft, BasketItem, NewProfile, Profile, SpecialOffer, Ticket};

use crate::StoreResult;

/// Read-only access to the hosted ticket catalog.
#[async_trait]
pub trait TicketCatalog: Send + Sync {
    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>>;
    async fn get_ticket(&self, id: &str) -> StoreResult<Ticket>;
    async fn special_offers(&self) -> StoreResult<Vec<SpecialOffer>>;
}

/// User-profile rows in the hosted users collection.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_uid(&self, uid: &str) -> StoreResult<Option<Profile>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Profile>>;
    async fn create(&self, profile: &NewProfile) -> StoreResult<Profile>;
    /// Full-record PUT; the store has no partial patch.
    async fn update(&self, id: &str, profile: &Profile) -> StoreResult<Profile>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Booking drafts in the hosted basket collection.
#[async_trait]
pub trait BasketStore: Send + Sync {
    /// The whole collection. The hosted store offers no server-side query,
    /// so owner scoping happens on the caller's side; it is a display
    /// filter, not an authorization boundary.
    async fn list(&self) -> StoreResult<Vec<BasketItem>>;
    async fn get(&self, id: &str) -> StoreResult<BasketItem>;
    async fn create(&self, draft: &BasketDraft) -> StoreResult<BasketItem>;
    async fn delete(&self, id: &str) -> StoreResult<()>;

    async fn list_for_owner(&self, uid: &str) -> StoreResult<Vec<BasketItem>> {
        let items = self.list().await?;
        Ok(items.into_iter().filter(|item| item.uid == uid).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use skyfare_shared::models::Baggage;

    struct FixedBasket {
        items: Vec<BasketItem>,
    }

    #[async_trait]
    impl BasketStore for FixedBasket {
        async fn list(&self) -> StoreResult<Vec<BasketItem>> {
            Ok(self.items.clone())
        }

        async fn get(&self, id: &str) -> StoreResult<BasketItem> {
            self.items
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .ok_or(crate::StoreError::NotFound)
        }

        async fn create(&self, _draft: &BasketDraft) -> StoreResult<BasketItem> {
            Err(crate::StoreError::Status { code: 500 })
        }

        async fn delete(&self, _id: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    fn item(id: &str, uid: &str) -> BasketItem {
        BasketItem {
            id: id.to_string(),
            uid: uid.to_string(),
            flight_number: "SF-1".into(),
            airline: "Turkish".into(),
            origin_city: "Moscow".into(),
            destination_city: "Istanbul".into(),
            departure_at: Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap(),
            passengers: 1,
            baggage: Baggage::Hand,
            total_price: 120.0,
            booked_by: "Anna".into(),
        }
    }

    #[tokio::test]
    async fn list_for_owner_keeps_only_that_owner() {
        let store = FixedBasket {
            items: vec![item("1", "u1"), item("2", "u2"), item("3", "u1")],
        };
        let mine = store.list_for_owner("u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|i| i.uid == "u1"));
    }
}
