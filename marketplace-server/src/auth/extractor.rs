//! JWT Extractor
//!
//! Validates the bearer token and yields the authenticated vendor.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{Claims, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use shared::AppError;

/// Authenticated vendor context, parsed from JWT claims
#[derive(Debug, Clone)]
pub struct CurrentVendor {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl TryFrom<Claims> for CurrentVendor {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        if claims.role != "vendor" {
            return Err(format!("unexpected role '{}'", claims.role));
        }
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| format!("invalid subject '{}'", claims.sub))?;
        Ok(Self {
            id,
            email: claims.email,
            name: claims.name,
        })
    }
}

impl FromRequestParts<ServerState> for CurrentVendor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(vendor) = parts.extensions.get::<CurrentVendor>() {
            return Ok(vendor.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::unauthorized());
            }
        };

        match state.get_jwt_service().validate_token(token) {
            Ok(claims) => {
                let vendor = CurrentVendor::try_from(claims)
                    .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))?;
                parts.extensions.insert(vendor.clone());
                Ok(vendor)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", parts.uri)
                );

                match e {
                    JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}
