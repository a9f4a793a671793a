use async_trait::async_trait;
use skyfare_core::repository::ProfileStore;
use skyfare_core::{StoreError, StoreResult};
use skyfare_shared::models::{NewProfile, Profile};
use tracing::info;

use crate::rest::RestClient;

/// Profile rows against the hosted users collection.
pub struct RestProfileStore {
    client: RestClient,
}

impl RestProfileStore {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Filtered GETs answer with an array; no match is a 404.
    async fn find_by(&self, field: &str, value: &str) -> StoreResult<Option<Profile>> {
        match self
            .client
            .get_json::<Vec<Profile>>("users", &[(field, value)])
            .await
        {
            Ok(rows) => Ok(rows.into_iter().next()),
            Err(StoreError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn find_by_uid(&self, uid: &str) -> StoreResult<Option<Profile>> {
        self.find_by("uid", uid).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Profile>> {
        self.find_by("email", email).await
    }

    async fn create(&self, profile: &NewProfile) -> StoreResult<Profile> {
        let created: Profile = self.client.post_json("users", profile).await?;
        info!("profile created for uid {}", created.uid);
        Ok(created)
    }

    async fn update(&self, id: &str, profile: &Profile) -> StoreResult<Profile> {
        self.client.put_json(&format!("users/{id}"), profile).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.client.delete(&format!("users/{id}")).await
    }
}
