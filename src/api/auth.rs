//! Bearer-token authorization for the data endpoint.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AuthRejection};
use crate::metrics;

use super::handlers::AppState;

/// Authorization policy applied before the data handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Any request is allowed; the header is inspected but never enforced.
    Permissive,
    /// Requests must carry `Authorization: Bearer <secret>`.
    RequireBearer(String),
}

impl AuthPolicy {
    /// Build the policy from configuration.
    ///
    /// Enforcement is opt-in: a secret alone does not switch it on.
    pub fn from_config(config: &Config) -> Self {
        match (config.enforce_auth, config.secret()) {
            (true, Some(secret)) => AuthPolicy::RequireBearer(secret.to_string()),
            _ => AuthPolicy::Permissive,
        }
    }

    /// Whether requests are actually rejected on a bad token.
    pub fn is_enforcing(&self) -> bool {
        matches!(self, AuthPolicy::RequireBearer(_))
    }

    /// Check a raw `Authorization` header value against the policy.
    pub fn check(&self, header: Option<&str>) -> Result<(), AuthRejection> {
        let expected = match self {
            AuthPolicy::Permissive => {
                debug!(
                    has_token = header.and_then(parse_bearer).is_some(),
                    "authorization not enforced"
                );
                return Ok(());
            }
            AuthPolicy::RequireBearer(secret) => secret,
        };

        let header = header.ok_or(AuthRejection::MissingHeader)?;
        let token = parse_bearer(header).ok_or(AuthRejection::MalformedHeader)?;

        if !tokens_match(token, expected) {
            return Err(AuthRejection::InvalidToken);
        }

        Ok(())
    }
}

/// Constant-time comparison of the tokens' SHA-256 digests.
fn tokens_match(given: &str, expected: &str) -> bool {
    let given = Sha256::digest(given.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());

    given
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is case-insensitive and may be separated from the token by any
/// whitespace. Returns `None` for other schemes or an empty token.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Middleware enforcing the configured [`AuthPolicy`].
pub async fn authorize(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Non-ASCII header values count as malformed.
    let value = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let outcome = state.auth.check(value);

    if let Err(rejection) = outcome {
        warn!(path = %request.uri().path(), reason = %rejection, "request rejected");
        metrics::inc_auth_rejections();
        return Err(rejection.into());
    }

    Ok(next.run(request).await)
}
