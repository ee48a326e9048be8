//! Service-account OAuth for the Docs and Drive APIs.
//!
//! Google's JWT-bearer grant: sign a short-lived RS256 assertion with the
//! service account's private key, exchange it at the token endpoint for a
//! bearer token. One token per publish sequence; nothing is cached.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GoogleServiceAccount;
use crate::gdocs::DocsError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const SCOPES: &str =
    "https://www.googleapis.com/auth/documents https://www.googleapis.com/auth/drive.file";
/// Google caps service-account assertions at one hour.
const ASSERTION_TTL_SECS: u64 = 3600;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchanges a signed assertion for an access token scoped to Docs + Drive.
pub(super) async fn fetch_access_token(
    http: &Client,
    account: &GoogleServiceAccount,
) -> Result<String, DocsError> {
    let assertion = sign_assertion(account, unix_now())?;

    let response = http
        .post(TOKEN_URL)
        .form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DocsError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}

fn sign_assertion(account: &GoogleServiceAccount, issued_at: u64) -> Result<String, DocsError> {
    let claims = Claims {
        iss: &account.client_email,
        scope: SCOPES,
        aud: TOKEN_URL,
        iat: issued_at,
        exp: issued_at + ASSERTION_TTL_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(account.private_key_id.clone());

    let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
        .map_err(|e| DocsError::Credentials(e.to_string()))?;

    jsonwebtoken::encode(&header, &claims, &key).map_err(|e| DocsError::Credentials(e.to_string()))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
