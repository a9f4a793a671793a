use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use skyfare_core::identity::{AuthSession, IdentityProvider};
use skyfare_core::{StoreError, StoreResult};
use skyfare_shared::models::Identity;
use tokio::sync::watch;
use tracing::info;

/// Client for the hosted Identity-Toolkit-style auth service.
///
/// Owns the current-identity observable: successful sign-in and sign-up
/// publish `Some(identity)`, sign-out publishes `None`.
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    current: watch::Sender<Option<Identity>>,
}

// ============================================================================
// Provider wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
struct IdpRequest {
    #[serde(rename = "postBody")]
    post_body: String,
    #[serde(rename = "requestUri")]
    request_uri: String,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
    #[serde(rename = "returnIdpCredential")]
    return_idp_credential: bool,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    #[serde(rename = "idToken")]
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
    #[serde(rename = "idToken")]
    id_token: String,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(rename = "photoUrl", default)]
    photo_url: Option<String>,
    #[serde(rename = "expiresIn", default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            current,
        }
    }

    async fn call<B: Serialize, T: DeserializeOwned>(&self, op: &str, body: &B) -> StoreResult<T> {
        let url = format!("{}/accounts:{}?key={}", self.base_url, op, self.api_key);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| StoreError::Decode(e.to_string()));
        }

        let message = response
            .json::<ProviderError>()
            .await
            .map(|e| e.error.message)
            .unwrap_or_default();
        Err(map_provider_error(status.as_u16(), &message))
    }

    fn publish(&self, session: &SessionResponse) -> AuthSession {
        let identity = Identity {
            uid: session.local_id.clone(),
            email: session.email.clone(),
            display_name: session.display_name.clone().filter(|s| !s.is_empty()),
            photo_url: session.photo_url.clone().filter(|s| !s.is_empty()),
        };
        self.current.send_replace(Some(identity.clone()));

        AuthSession {
            identity,
            id_token: session.id_token.clone(),
            expires_in: session
                .expires_in
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
        }
    }
}

/// The provider reports failures as upper-snake message codes, sometimes with
/// a trailing explanation after the code.
fn map_provider_error(status: u16, message: &str) -> StoreError {
    let code = message.split_whitespace().next().unwrap_or("");
    match code {
        "EMAIL_EXISTS" => StoreError::EmailTaken,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            StoreError::InvalidCredentials
        }
        "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" | "TOKEN_EXPIRED" => StoreError::RequiresRecentLogin,
        _ => StoreError::Status { code: status },
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> StoreResult<AuthSession> {
        let response: SessionResponse = self
            .call(
                "signUp",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        info!("account created for {}", response.email);
        Ok(self.publish(&response))
    }

    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<AuthSession> {
        let response: SessionResponse = self
            .call(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        Ok(self.publish(&response))
    }

    async fn sign_in_with_idp(&self, provider_token: &str) -> StoreResult<AuthSession> {
        let response: SessionResponse = self
            .call(
                "signInWithIdp",
                &IdpRequest {
                    post_body: format!("id_token={provider_token}&providerId=google.com"),
                    request_uri: "http://localhost".to_string(),
                    return_secure_token: true,
                    return_idp_credential: true,
                },
            )
            .await?;
        Ok(self.publish(&response))
    }

    async fn sign_out(&self) {
        // Provider sessions are bearer tokens; signing out is local.
        self.current.send_replace(None);
    }

    async fn delete_account(&self, id_token: &str) -> StoreResult<()> {
        self.call::<_, serde_json::Value>("delete", &DeleteRequest { id_token })
            .await?;
        info!("provider account deleted");
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_codes_map_to_distinct_variants() {
        assert!(matches!(
            map_provider_error(400, "EMAIL_EXISTS"),
            StoreError::EmailTaken
        ));
        assert!(matches!(
            map_provider_error(400, "INVALID_LOGIN_CREDENTIALS"),
            StoreError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_error(400, "INVALID_PASSWORD : The password is invalid"),
            StoreError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_error(400, "CREDENTIAL_TOO_OLD_LOGIN_AGAIN"),
            StoreError::RequiresRecentLogin
        ));
        assert!(matches!(
            map_provider_error(429, "QUOTA_EXCEEDED"),
            StoreError::Status { code: 429 }
        ));
    }

    #[test]
    fn sign_in_publishes_to_the_observable() {
        let provider = HttpIdentityProvider::new("https://id.example.com", "key");
        let receiver = provider.subscribe();
        assert!(receiver.borrow().is_none());

        let session = provider.publish(&SessionResponse {
            local_id: "u1".into(),
            email: "anna@example.com".into(),
            id_token: "tok".into(),
            display_name: Some(String::new()),
            photo_url: None,
            expires_in: Some("3600".into()),
        });

        assert_eq!(session.identity.uid, "u1");
        assert_eq!(session.identity.display_name, None);
        assert_eq!(session.expires_in, 3600);
        assert_eq!(
            receiver.borrow().as_ref().map(|i| i.uid.clone()),
            Some("u1".to_string())
        );
    }
}
