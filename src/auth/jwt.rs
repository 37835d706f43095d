use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::{
    claims::{Claims, RESERVED_CLAIMS},
    errors::AuthError,
};
use crate::config::JwtConfig;

/// The only algorithm tokens are signed and accepted with.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signing and verification keys prepared once from configuration.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            access_ttl: Duration::from_secs((cfg.ttl_minutes.max(0) as u64).saturating_mul(60)),
        }
    }

    /// Signs `claims` merged with server-computed `exp`, `iat`, `iss` and `aud`.
    /// `claims` must carry a string `sub`; caller values for reserved claims
    /// are dropped. `ttl` defaults to the configured access TTL.
    pub fn issue(
        &self,
        mut claims: Map<String, Value>,
        ttl: Option<Duration>,
    ) -> Result<String, AuthError> {
        let sub = match claims.remove("sub") {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => {
                return Err(AuthError::InvalidInput(
                    "token claims must include a non-empty string `sub`".into(),
                ))
            }
        };
        for key in RESERVED_CLAIMS {
            claims.remove(key);
        }

        let now = OffsetDateTime::now_utc();
        let ttl = ttl.unwrap_or(self.access_ttl);
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|secs| now.checked_add(TimeDuration::seconds(secs)))
            .ok_or_else(|| AuthError::InvalidInput("token ttl is out of range".into()))?;
        let payload = Claims {
            sub: Some(sub),
            exp: exp.unix_timestamp(),
            iat: now.unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            extra: claims,
        };
        let token = encode(&Header::new(ALGORITHM), &payload, &self.encoding)?;
        debug!(exp = payload.exp, "jwt signed");
        Ok(token)
    }

    /// Issues an access token whose subject is `email`.
    pub fn issue_for_subject(&self, email: &str) -> Result<String, AuthError> {
        let mut claims = Map::new();
        claims.insert("sub".into(), Value::String(email.to_string()));
        self.issue(claims, None)
    }

    /// Verifies signature, algorithm, issuer, audience and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "jwt rejected");
            AuthError::InvalidToken
        })?;

        // A token is dead from its `exp` second onward.
        if data.claims.exp <= OffsetDateTime::now_utc().unix_timestamp() {
            debug!(exp = data.claims.exp, "jwt expired");
            return Err(AuthError::InvalidToken);
        }
        Ok(data.claims)
    }

    #[cfg(test)]
    pub(crate) fn sign_raw(&self, header: &Header, claims: &Claims) -> String {
        encode(header, claims, &self.encoding).expect("encode")
    }
}

/// Corrupts the first character of a token's signature segment.
#[cfg(test)]
pub(crate) fn flip_signature_byte(token: &str) -> String {
    let (head, sig) = token.rsplit_once('.').expect("jwt has three segments");
    let mut sig: Vec<char> = sig.chars().collect();
    sig[0] = if sig[0] == 'A' { 'B' } else { 'A' };
    format!("{}.{}", head, sig.into_iter().collect::<String>())
}
