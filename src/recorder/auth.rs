//! Service-account authentication for Google APIs.
//!
//! Uses the OAuth 2.0 JWT bearer grant: an RS256 assertion signed with the
//! service account's private key is exchanged for an access token at the
//! key's `token_uri`.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::{GOOGLE_SCOPES, JWT_BEARER_GRANT_TYPE, JWT_LIFETIME_SECS};
use crate::error_handling::{truncate_body, RecorderError};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The fields of a service-account key document this service needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountKey {
    /// Parses a service-account key document (the JSON downloaded from the
    /// cloud console).
    pub fn from_json(text: &str) -> Result<Self, RecorderError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Signs the bearer assertion, issued at `issued_at` (Unix seconds).
    pub fn assertion(&self, issued_at: i64) -> Result<String, RecorderError> {
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: GOOGLE_SCOPES.join(" "),
            aud: self.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + JWT_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
    }

    /// Exchanges a fresh assertion for an access token.
    pub async fn access_token(&self, client: &reqwest::Client) -> Result<String, RecorderError> {
        let assertion = self.assertion(chrono::Utc::now().timestamp())?;
        let response = client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecorderError::Api {
                operation: "token exchange",
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}
