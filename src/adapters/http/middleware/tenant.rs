//! Tenant extraction.
//!
//! The tenant is read once per request and handed to handlers as an explicit
//! value. A missing, blank or non-UTF-8 header falls back to the shared
//! unspecified tenant rather than rejecting the request.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::foundation::TenantId;

/// Header carrying the caller's tenant.
pub const TENANT_HEADER: &str = "current-user";

/// The tenant a request is made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentTenant(pub TenantId);

impl CurrentTenant {
    fn from_header(value: Option<&str>) -> Self {
        let tenant = value
            .and_then(|raw| TenantId::new(raw.trim()).ok())
            .unwrap_or_else(TenantId::unspecified);
        Self(tenant)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|value| value.to_str().ok());
        Ok(Self::from_header(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> CurrentTenant {
        let (mut parts, _) = request.into_parts();
        CurrentTenant::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_tenant_from_header() {
        let request = Request::builder()
            .header(TENANT_HEADER, "acme")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.0.as_str(), "acme");
    }

    #[tokio::test]
    async fn missing_header_uses_unspecified_tenant() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await.0.as_str(), TenantId::UNSPECIFIED);
    }

    #[tokio::test]
    async fn blank_header_uses_unspecified_tenant() {
        let request = Request::builder()
            .header(TENANT_HEADER, "   ")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.0.as_str(), TenantId::UNSPECIFIED);
    }
}
