use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::analytics::AnalyticsError;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Rejected,
}

/// Checks the dashboard's shared admin secret.
///
/// The secret is injected at construction; an empty secret rejects every key.
pub struct AccessGuard {
    secret_digest: Option<Vec<u8>>,
}

impl AccessGuard {
    pub fn new(secret: Option<&str>) -> Self {
        let secret_digest = secret
            .filter(|s| !s.is_empty())
            .map(|s| Sha256::digest(s.as_bytes()).to_vec());
        Self { secret_digest }
    }

    pub fn is_configured(&self) -> bool {
        self.secret_digest.is_some()
    }

    pub fn authorize(&self, supplied: Option<&str>) -> Authorization {
        let (Some(expected), Some(supplied)) = (self.secret_digest.as_ref(), supplied) else {
            return Authorization::Rejected;
        };

        // Compare fixed-length digests so the key length does not leak through timing
        let supplied_digest = Sha256::digest(supplied.as_bytes());
        if bool::from(expected.as_slice().ct_eq(supplied_digest.as_slice())) {
            Authorization::Authorized
        } else {
            Authorization::Rejected
        }
    }
}

pub async fn require_admin_key(
    State(guard): State<Arc<AccessGuard>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let supplied = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match guard.authorize(supplied) {
        Authorization::Authorized => next.run(request).await,
        Authorization::Rejected => {
            warn!(
                "Rejected analytics request to {} (admin key {})",
                request.uri().path(),
                if supplied.is_some() { "invalid" } else { "missing" }
            );
            AnalyticsError::Unauthorized.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_key_is_authorized() {
        let guard = AccessGuard::new(Some("s3cret-key"));
        assert_eq!(guard.authorize(Some("s3cret-key")), Authorization::Authorized);
    }

    #[test]
    fn test_wrong_or_missing_key_is_rejected() {
        let guard = AccessGuard::new(Some("s3cret-key"));
        assert_eq!(guard.authorize(None), Authorization::Rejected);
        assert_eq!(guard.authorize(Some("")), Authorization::Rejected);
        assert_eq!(guard.authorize(Some("s3cret-ke")), Authorization::Rejected);
        assert_eq!(guard.authorize(Some("s3cret-key ")), Authorization::Rejected);
        assert_eq!(guard.authorize(Some("S3CRET-KEY")), Authorization::Rejected);
    }

    #[test]
    fn test_unconfigured_guard_rejects_everything() {
        for guard in [AccessGuard::new(None), AccessGuard::new(Some(""))] {
            assert!(!guard.is_configured());
            assert_eq!(guard.authorize(None), Authorization::Rejected);
            assert_eq!(guard.authorize(Some("")), Authorization::Rejected);
            assert_eq!(guard.authorize(Some("anything")), Authorization::Rejected);
        }
    }
}
