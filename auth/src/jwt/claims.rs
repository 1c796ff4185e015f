use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity carried inside a signed access token.
///
/// Serialized as `{"user_id", "username", "exp", "iat"}` with Unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Account identifier
    #[serde(rename = "user_id")]
    pub subject_id: i64,

    /// Account username
    #[serde(rename = "username")]
    pub subject_name: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl IdentityClaims {
    /// Build claims for a subject issued at `issued_at` and valid for `ttl`.
    pub fn new(
        subject_id: i64,
        subject_name: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            subject_id,
            subject_name: subject_name.into(),
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.iat, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Check if token is expired. A token is still valid at exactly `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let issued_at = Utc::now();
        let claims = IdentityClaims::new(42, "alice", issued_at, Duration::hours(24));

        assert_eq!(claims.subject_id, 42);
        assert_eq!(claims.subject_name, "alice");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }

    #[test]
    fn test_wire_field_names() {
        let claims = IdentityClaims {
            subject_id: 7,
            subject_name: "bob".to_string(),
            exp: 2000,
            iat: 1000,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["username"], "bob");
        assert_eq!(json["exp"], 2000);
        assert_eq!(json["iat"], 1000);
    }

    #[test]
    fn test_is_expired() {
        let claims = IdentityClaims {
            subject_id: 1,
            subject_name: "alice".to_string(),
            exp: 1000,
            iat: 0,
        };

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }
}
