//! Axum extractor for RequestContext.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};
use uuid::Uuid;
use workshop_core::booking::Role;
use workshop_core::schedule::CallerIdentity;

use super::types::{RequestContext, RequestId};

pub use workshop_core::storage::{EMAIL_HEADER, ROLE_HEADER, USERNAME_HEADER};

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reads the caller identity. A missing role header means a manager.
fn extract_identity(headers: &HeaderMap) -> Result<CallerIdentity, (StatusCode, String)> {
    let role = match header_value(headers, ROLE_HEADER) {
        Some(value) => value
            .parse::<Role>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => Role::Manager,
    };

    let mut identity = CallerIdentity::new(role);
    identity.email = header_value(headers, EMAIL_HEADER);
    identity.username = header_value(headers, USERNAME_HEADER);
    Ok(identity)
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = extract_request_id(&parts.headers);
        let identity = extract_identity(&parts.headers)?;

        tracing::debug!(%request_id, role = %identity.role, "Resolved caller identity");

        Ok(RequestContext {
            identity,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        let id = "550e8400-e29b-41d4-a716-446655440000";
        headers.insert("x-request-id", id.parse().unwrap());

        let request_id = extract_request_id(&headers);
        assert_eq!(request_id.to_string(), id);
    }

    #[test]
    fn test_extract_request_id_generates_when_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "not-a-uuid".parse().unwrap());

        let request_id = extract_request_id(&headers);

        Uuid::parse_str(&request_id.to_string()).expect("Should be valid UUID");
    }

    #[test]
    fn test_missing_role_defaults_to_manager() {
        let identity = extract_identity(&HeaderMap::new()).unwrap();
        assert_eq!(identity, CallerIdentity::manager());
    }

    #[test]
    fn test_mechanic_identity_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, "Mechanic".parse().unwrap());
        headers.insert(EMAIL_HEADER, "marta@workshop.test".parse().unwrap());
        headers.insert(USERNAME_HEADER, " ".parse().unwrap());

        let identity = extract_identity(&headers).unwrap();

        assert_eq!(identity, CallerIdentity::mechanic("marta@workshop.test"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, "admin".parse().unwrap());

        let (status, message) = extract_identity(&headers).unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Unknown role: admin");
    }
}
