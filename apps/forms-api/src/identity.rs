//! Caller identity supplied by the fronting proxy

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

pub const USER_HEADER: &str = "x-user-name";
pub const GROUP_HEADER: &str = "x-group-id";

/// The authenticated user and their primary group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_name: String,
    pub group_id: i64,
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_name = header(parts, USER_HEADER)
            .ok_or_else(|| ApiError::Unauthorized(format!("missing {} header", USER_HEADER)))?
            .to_string();

        let group_id = header(parts, GROUP_HEADER)
            .ok_or_else(|| ApiError::Unauthorized(format!("missing {} header", GROUP_HEADER)))?
            .parse()
            .map_err(|_| ApiError::Unauthorized(format!("malformed {} header", GROUP_HEADER)))?;

        Ok(Self {
            user_name,
            group_id,
        })
    }
}
