//! Service-account authentication for the Earth Engine REST API.
//!
//! A signed JWT assertion is exchanged once for a bearer token
//! (OAuth 2.0 JWT bearer grant).

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::ImageryError;

/// OAuth scopes requested for the token.
pub const SCOPES: &str =
    "https://www.googleapis.com/auth/earthengine https://www.googleapis.com/auth/cloud-platform";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_MINUTES: i64 = 60;

/// The fields of a Google service-account JSON key this tool uses.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Account email, used as the default issuer.
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    /// Project the account belongs to.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Token endpoint.
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    /// Reads and parses a key file.
    ///
    /// # Errors
    ///
    /// Returns [`ImageryError::KeyFile`] if the file is missing or malformed.
    pub fn from_file(path: &Path) -> Result<Self, ImageryError> {
        let key_error = |reason: String| ImageryError::KeyFile {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| key_error(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| key_error(format!("invalid key JSON: {e}")))
    }

    /// Token endpoint, falling back to Google's default.
    #[must_use]
    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

/// Claims of the JWT assertion.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Service-account email.
    pub iss: String,
    /// Space-separated OAuth scopes.
    pub scope: String,
    /// Token endpoint.
    pub aud: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Signs an RS256 assertion for `issuer`, valid for one hour from `now`.
///
/// # Errors
///
/// Returns [`ImageryError::Auth`] if the private key is not a valid RSA PEM.
pub fn sign_assertion(
    key: &ServiceAccountKey,
    issuer: &str,
    now: DateTime<Utc>,
) -> Result<String, ImageryError> {
    let claims = Claims {
        iss: issuer.to_string(),
        scope: SCOPES.to_string(),
        aud: key.token_uri().to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ASSERTION_LIFETIME_MINUTES)).timestamp(),
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| ImageryError::Auth(format!("invalid private key: {e}")))?;
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| ImageryError::Auth(format!("failed to sign assertion: {e}")))
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct TokenError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Exchanges a fresh assertion for a bearer token.
///
/// # Errors
///
/// Returns an error if signing fails, the endpoint is unreachable, or the
/// grant is rejected.
pub async fn fetch_access_token(
    client: &Client,
    key: &ServiceAccountKey,
    issuer: &str,
) -> Result<String, ImageryError> {
    let assertion = sign_assertion(key, issuer, Utc::now())?;

    let response = client
        .post(key.token_uri())
        .form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let msg = serde_json::from_str::<TokenError>(&body)
            .map(|e| match e.error_description {
                Some(description) => format!("{}: {description}", e.error),
                None => e.error,
            })
            .unwrap_or(body);
        return Err(ImageryError::Auth(format!(
            "token exchange rejected ({}): {msg}",
            status.as_u16()
        )));
    }

    serde_json::from_str::<TokenResponse>(&body)
        .map(|t| t.access_token)
        .map_err(|e| ImageryError::Decode(format!("token response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation};

    const KEY_JSON: &str = include_str!("../../../tests/fixtures/service_account.json");
    const PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/service_account.pub.pem");

    fn key() -> ServiceAccountKey {
        serde_json::from_str(KEY_JSON).unwrap()
    }

    #[test]
    fn parses_key_fields() {
        let key = key();
        assert_eq!(
            key.client_email,
            "ndvi-test@ndvi-test-project.iam.gserviceaccount.com"
        );
        assert_eq!(key.project_id.as_deref(), Some("ndvi-test-project"));
        assert_eq!(key.token_uri(), "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn assertion_verifies_with_public_key() {
        let key = key();
        let now = Utc::now();
        let token = sign_assertion(&key, &key.client_email, now).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.googleapis.com/token"]);
        let decoded = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_rsa_pem(PUBLIC_PEM.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.claims.iss, key.client_email);
        assert_eq!(decoded.claims.scope, SCOPES);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
    }

    #[test]
    fn rejects_malformed_private_key() {
        let mut key = key();
        key.private_key = "not a pem".into();
        let err = sign_assertion(&key, "x", Utc::now()).unwrap_err();
        assert!(matches!(err, ImageryError::Auth(_)));
    }

    #[test]
    fn missing_key_file_is_reported_with_path() {
        let err = ServiceAccountKey::from_file(Path::new("/nonexistent/ee-key.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ee-key.json"));
    }
}
