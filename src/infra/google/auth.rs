use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::infra::google::api_failure;
use crate::usecase::ports::credentials::{CredentialError, TokenProvider};

pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/presentations",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
const EXPIRY_MARGIN_SECS: u64 = 300;

/// The fields of a service-account key file that the token exchange needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(raw: &str) -> Result<Self, CredentialError> {
        let key: Self =
            serde_json::from_str(raw).map_err(|err| CredentialError::Invalid(err.to_string()))?;
        if key.client_email.trim().is_empty() {
            return Err(CredentialError::Invalid("client_email is empty".to_string()));
        }
        Ok(key)
    }

    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        if !path.exists() {
            return Err(CredentialError::Missing(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path).map_err(|err| {
            CredentialError::Invalid(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// OAuth2 JWT-bearer flow for a service account. Tokens are cached in memory
/// and never logged.
pub struct ServiceAccountAuth {
    client: reqwest::blocking::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey) -> Result<Self, CredentialError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|err| CredentialError::Invalid(format!("private_key: {err}")))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|err| CredentialError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            key,
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        let key = ServiceAccountKey::from_file(path)?;
        info!(account = %key.client_email, "loaded service account key");
        Self::new(key)
    }

    pub fn account(&self) -> &str {
        &self.key.client_email
    }

    fn signed_assertion(&self, issued_at: u64) -> Result<String, CredentialError> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPES.join(" "),
            aud: &self.key.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        encode(&header, &claims, &self.encoding_key)
            .map_err(|err| CredentialError::Invalid(format!("failed to sign assertion: {err}")))
    }

    fn exchange(&self) -> Result<CachedToken, CredentialError> {
        let issued_at = now_secs();
        let assertion = self.signed_assertion(issued_at)?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&params)
            .send()
            .map_err(|err| CredentialError::Transport(err.to_string()))?;
        if !response.status().is_success() {
            let failure = api_failure(response);
            return Err(CredentialError::Rejected(failure.to_string()));
        }
        let body: TokenResponse = response
            .json()
            .map_err(|err| CredentialError::Transport(format!("invalid token response: {err}")))?;
        Ok(CachedToken {
            value: body.access_token,
            expires_at: issued_at + body.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS),
        })
    }
}

impl TokenProvider for ServiceAccountAuth {
    fn access_token(&self) -> Result<String, CredentialError> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| CredentialError::Transport("token cache poisoned".to_string()))?;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > now_secs() + EXPIRY_MARGIN_SECS {
                return Ok(token.value.clone());
            }
        }

        let token = self.exchange()?;
        debug!(account = %self.key.client_email, "acquired access token");
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}
