use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::errors::TokenError;

/// Default lifetime of an issued token.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Issues and validates signed, time-limited bearer tokens.
///
/// Tokens are compact JWS strings (`header.claims.signature`) signed with
/// HS256. The secret is fixed at construction and never changes afterwards,
/// so one instance can be shared freely across request handlers.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service with a signing secret and the default 24h lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Supply it from configuration, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a subject, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, subject_id: i64, subject_name: &str) -> Result<String, TokenError> {
        self.issue_at(subject_id, subject_name, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue_at(
        &self,
        subject_id: i64,
        subject_name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = IdentityClaims::new(subject_id, subject_name, issued_at, self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims unchanged.
    ///
    /// The signature is checked before anything else, so a tampered token is
    /// reported as `InvalidSignature` even when it is also expired. There is no
    /// clock leeway: a token is rejected one second after `exp`.
    ///
    /// # Errors
    /// * `Malformed` - Not a three-segment JWS, bad encoding, wrong algorithm or missing claims
    /// * `InvalidSignature` - Signature does not match (tampering or wrong secret)
    /// * `Expired` - Current time is past `exp`
    pub fn validate(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<IdentityClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
