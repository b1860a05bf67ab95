use crate::types::{AppError, Claims, Role};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    dangerous::insecure_decode, decode, encode, errors::ErrorKind, Algorithm, DecodingKey,
    EncodingKey, Header, Validation,
};
use tracing::debug;

/// Failures of the password hasher and the token validator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Failed to sign token: {0}")]
    TokenEncoding(String),

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    ExpiredToken,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(_) | AuthError::MalformedHash(_) | AuthError::TokenEncoding(_) => {
                AppError::Internal(err.to_string())
            }
            AuthError::MalformedToken | AuthError::InvalidSignature | AuthError::ExpiredToken => {
                AppError::Auth("Invalid or expired token".to_string())
            }
        }
    }
}

/// Issues and validates HS256 bearer tokens.
///
/// Tokens are stateless: nothing is persisted server-side and a token stops
/// being accepted only once `exp` has passed.
pub struct AuthService {
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    /// Creates a new AuthService.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing tokens (should be at least 32 chars)
    /// * `token_ttl_hours` - Token validity in hours
    pub fn new(jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// Token lifetime in seconds.
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_hours.saturating_mul(3600)
    }

    /// Issues a token for the given identity, valid from now.
    pub fn issue_token(&self, user_id: i64, username: &str, role: Role) -> Result<String, AuthError> {
        self.issue_token_at(user_id, username, role, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_token_at(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expires_at = Duration::try_hours(self.token_ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AuthError::TokenEncoding(format!(
                    "token lifetime of {}h is out of range",
                    self.token_ttl_hours
                ))
            })?;

        let claims = Claims {
            user_id,
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        debug!(user_id, username, "Issuing token");

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }

    /// Verifies signature and expiry and returns the claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validates a token against the given clock. Expiry is a hard boundary:
    /// a token is rejected once `now >= exp`.
    ///
    /// Structure is checked before the signature: anything other than three
    /// segments with a decodable header and claims is `MalformedToken`, and any
    /// failure after that point is `InvalidSignature`.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        if token.split('.').count() != 3 {
            return Err(AuthError::MalformedToken);
        }
        insecure_decode::<Claims>(token).map_err(|_| AuthError::MalformedToken)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // expiry is checked below against the injected clock
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            // header and claims already decoded, so base64 failures are in the signature
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::Base64(_) => {
                AuthError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::MalformedToken,
        })?;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }
}
