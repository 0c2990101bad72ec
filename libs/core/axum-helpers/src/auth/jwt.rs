use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token time-to-live in seconds (15 minutes)
pub const ACCESS_TOKEN_TTL: i64 = 900;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // Subject (user ID)
    pub email: String, // User email
    pub exp: i64,      // Expiration time
    pub iat: i64,      // Issued at
    pub jti: String,   // JWT ID
}

/// Stateless HS256 JWT authentication.
///
/// Signs and verifies bearer tokens; the token itself is the whole
/// credential, there is no server-side session state.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!("JWT auth initialized");
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create an access token for the given subject
    pub fn create_access_token(&self, user_id: &str, email: &str) -> eyre::Result<String> {
        self.create_token(user_id, email, ACCESS_TOKEN_TTL)
    }

    fn create_token(&self, user_id: &str, email: &str, ttl_seconds: i64) -> eyre::Result<String> {
        let now = Utc::now();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify token signature and expiry, returning the decoded claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("unit-test-secret-that-is-32-chars-long!"))
    }

    #[test]
    fn test_token_round_trip() {
        let auth = test_auth();
        let user_id = Uuid::now_v7().to_string();

        let token = auth.create_access_token(&user_id, "a@example.com").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let auth = test_auth();
        assert!(auth.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let auth = test_auth();
        let other = JwtAuth::new(&JwtConfig::new("a-different-secret-also-32-chars-long!!"));

        let token = auth.create_access_token("user", "a@example.com").unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_tokens_carry_unique_jti() {
        let auth = test_auth();
        let t1 = auth.create_access_token("user", "a@example.com").unwrap();
        let t2 = auth.create_access_token("user", "a@example.com").unwrap();

        let c1 = auth.verify_token(&t1).unwrap();
        let c2 = auth.verify_token(&t2).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }
}
