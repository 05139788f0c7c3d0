//! Identity extractors.
//!
//! Authentication happens upstream; the gateway forwards the caller's
//! identity as trusted headers. These extractors only read them:
//! `x-customer-id` carries the authenticated customer's UUID and
//! `x-user-role` carries the caller's role.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated customer on customer-facing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerIdentity(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CustomerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(CUSTOMER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing customer identity".to_string()))?;

        let id = header
            .parse::<Uuid>()
            .map_err(|_| AppError::Unauthorized("malformed customer identity".to_string()))?;

        Ok(CustomerIdentity(id))
    }
}

/// Marker for admin-authorized endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminIdentity;

#[async_trait]
impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok());

        match role {
            Some("admin") => Ok(AdminIdentity),
            _ => Err(AppError::Forbidden("admin authorization required".to_string())),
        }
    }
}
