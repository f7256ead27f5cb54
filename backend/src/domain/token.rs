//! HS256 bearer tokens.
//!
//! Tokens are compact JWS strings: `base64url(header).base64url(claims).base64url(mac)`
//! with an HMAC-SHA256 signature over the first two segments. Only `HS256`
//! is issued or accepted.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// The only supported signing algorithm.
pub const TOKEN_ALGORITHM: &str = "HS256";
/// Token type returned alongside access tokens.
pub const TOKEN_TYPE: &str = "bearer";
/// Default access-token lifetime in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Reasons a token failed to issue or verify.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token algorithm is not supported")]
    UnsupportedAlgorithm,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token signing key is invalid")]
    InvalidKey,
    #[error("token encoding failed: {message}")]
    Encoding { message: String },
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email address.
    pub sub: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Issues and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct AccessTokenSigner {
    secret: Arc<Zeroizing<Vec<u8>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AccessTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl AccessTokenSigner {
    /// Create a signer. An empty secret is rejected.
    pub fn new(
        secret: impl Into<Vec<u8>>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(TokenError::InvalidKey);
        }
        Ok(Self {
            secret: Arc::new(secret),
            ttl,
            clock,
        })
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(self.secret.as_slice()).map_err(|_| TokenError::InvalidKey)
    }

    /// Issue a token for `subject`, expiring after the configured lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub: subject.to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let header = Header {
            alg: TOKEN_ALGORITHM.to_owned(),
            typ: "JWT".to_owned(),
        };
        let header_json = serde_json::to_vec(&header).map_err(|err| TokenError::Encoding {
            message: err.to_string(),
        })?;
        let claims_json = serde_json::to_vec(&claims).map_err(|err| TokenError::Encoding {
            message: err.to_string(),
        })?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Verify structure, algorithm, signature and expiry; return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut segments = token.trim().split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != TOKEN_ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;
        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims: Claims = decode_segment(claims_b64)?;
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    struct SteppingClock(Mutex<DateTime<Utc>>);

    impl SteppingClock {
        fn advance_minutes(&self, minutes: i64) {
            let mut now = self.0.lock().expect("clock lock");
            *now += Duration::minutes(minutes);
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    #[fixture]
    fn clock() -> Arc<SteppingClock> {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid instant");
        Arc::new(SteppingClock(Mutex::new(start)))
    }

    fn signer(clock: &Arc<SteppingClock>, secret: &str) -> AccessTokenSigner {
        AccessTokenSigner::new(
            secret,
            Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
            clock.clone(),
        )
        .expect("signer")
    }

    #[rstest]
    fn issued_tokens_verify(clock: Arc<SteppingClock>) {
        let signer = signer(&clock, "s3cret");
        let token = signer.issue("ada@example.org").expect("token");
        let claims = signer.verify(&token).expect("claims");
        assert_eq!(claims.sub, "ada@example.org");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_MINUTES * 60);
    }

    #[rstest]
    fn tokens_expire(clock: Arc<SteppingClock>) {
        let signer = signer(&clock, "s3cret");
        let token = signer.issue("ada@example.org").expect("token");
        clock.advance_minutes(DEFAULT_TOKEN_TTL_MINUTES);
        assert_eq!(signer.verify(&token), Err(TokenError::Expired));
    }

    #[rstest]
    fn other_secret_is_rejected(clock: Arc<SteppingClock>) {
        let token = signer(&clock, "s3cret").issue("ada@example.org").expect("token");
        assert_eq!(
            signer(&clock, "other").verify(&token),
            Err(TokenError::BadSignature)
        );
    }

    #[rstest]
    fn tampered_claims_are_rejected(clock: Arc<SteppingClock>) {
        let signer = signer(&clock, "s3cret");
        let token = signer.issue("ada@example.org").expect("token");
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims {
                sub: "mallory@example.org".to_owned(),
                iat: 0,
                exp: i64::MAX,
            })
            .expect("json"),
        );
        parts[1] = &forged_claims;
        assert_eq!(signer.verify(&parts.join(".")), Err(TokenError::BadSignature));
    }

    #[rstest]
    fn none_algorithm_is_rejected(clock: Arc<SteppingClock>) {
        let signer = signer(&clock, "s3cret");
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(br#"{"sub":"a@b","iat":0,"exp":9999999999}"#);
        assert_eq!(
            signer.verify(&format!("{header}.{claims}.")),
            Err(TokenError::UnsupportedAlgorithm)
        );
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    #[case("!!!.???.***")]
    fn malformed_tokens_are_rejected(clock: Arc<SteppingClock>, #[case] token: &str) {
        assert_eq!(signer(&clock, "s3cret").verify(token), Err(TokenError::Malformed));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let result = AccessTokenSigner::new(
            Vec::new(),
            Duration::minutes(1),
            Arc::new(mockable::DefaultClock),
        );
        assert!(matches!(result, Err(TokenError::InvalidKey)));
    }
}
