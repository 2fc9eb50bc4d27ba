use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::{
        claims::{Claims, TokenPayload},
        AuthError, AuthErrorKind,
    },
    config::Config,
    errors::{AppError, AppResult},
};

/// Key material used to verify token signatures.
#[derive(Clone, Debug)]
pub enum VerificationKey {
    /// Shared HMAC secret (HS256).
    Hmac(SecretString),
    /// PEM-encoded RSA public key of the identity provider (RS256).
    RsaPem(String),
}

impl VerificationKey {
    pub fn from_config(config: &Config) -> Self {
        match &config.auth_public_key_pem {
            Some(pem) => VerificationKey::RsaPem(pem.clone()),
            None => VerificationKey::Hmac(config.jwt_secret.clone()),
        }
    }

    fn algorithm(&self) -> Algorithm {
        match self {
            VerificationKey::Hmac(_) => Algorithm::HS256,
            VerificationKey::RsaPem(_) => Algorithm::RS256,
        }
    }

    fn decoding_key(&self) -> AppResult<DecodingKey> {
        match self {
            VerificationKey::Hmac(secret) => {
                Ok(DecodingKey::from_secret(secret.expose_secret().as_bytes()))
            }
            VerificationKey::RsaPem(pem) => DecodingKey::from_rsa_pem(pem.as_bytes())
                .map_err(|e| AppError::InternalError(format!("Invalid RSA public key: {}", e))),
        }
    }
}

/// Verifies bearer tokens and checks them for a required permission.
///
/// Built once at startup and shared by every worker; checking a token never
/// touches shared mutable state.
#[derive(Clone)]
pub struct PermissionChecker {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl PermissionChecker {
    pub fn new(
        key: &VerificationKey,
        audience: Option<&str>,
        issuer: Option<&str>,
    ) -> AppResult<Self> {
        let mut validation = Validation::new(key.algorithm());
        // Expiry is exact: a token is rejected as soon as `exp` has passed.
        validation.leeway = 0;

        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }

        Ok(Self {
            decoding_key: key.decoding_key()?,
            validation,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            &VerificationKey::from_config(config),
            config.auth_audience.as_deref(),
            config.auth_issuer.as_deref(),
        )
    }

    /// Validates the token in an `Authorization` header value and requires
    /// `required_permission` among its granted permissions.
    pub fn check(
        &self,
        authorization: Option<&str>,
        required_permission: &str,
    ) -> Result<Claims, AuthError> {
        let token = bearer_token(authorization)?;
        let claims = self.verify(token)?;

        if !claims.has_permission(required_permission) {
            log::warn!(
                "Token for {:?} lacks permission '{}'",
                claims.sub,
                required_permission
            );
            return Err(AuthError::forbidden());
        }

        Ok(claims)
    }

    /// Decodes the token and validates signature, expiry, audience and issuer.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let payload = decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| map_jwt_error(&e))?;

        payload.into_claims().ok_or_else(|| {
            AuthError::new(
                AuthErrorKind::IncorrectClaims,
                "Permissions not included in JWT.",
            )
        })
    }
}

/// Extracts the token from a `Bearer <token>` header value.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(AuthError::missing_token)?;

    let mut parts = header.split_whitespace();

    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::malformed(
            "Authorization header must start with \"Bearer\".",
        ));
    }

    let token = parts
        .next()
        .ok_or_else(|| AuthError::malformed("Token not found."))?;

    if parts.next().is_some() {
        return Err(AuthError::malformed(
            "Authorization header must be bearer token.",
        ));
    }

    Ok(token)
}

fn map_jwt_error(err: &jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::new(AuthErrorKind::Expired, "Token expired."),
        ErrorKind::InvalidSignature => AuthError::new(
            AuthErrorKind::InvalidSignature,
            "Unable to verify the token signature.",
        ),
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::new(
            AuthErrorKind::IncorrectClaims,
            "Incorrect claims. Please, check the audience and issuer.",
        ),
        ErrorKind::InvalidToken
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingAlgorithm
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::malformed("Unable to parse authentication token."),
        other => {
            log::error!("Token verification failed unexpectedly: {:?}", other);
            AuthError::new(
                AuthErrorKind::InvalidSignature,
                "Unable to verify the token signature.",
            )
        }
    }
}
