//! Request extractor resolving the acting user.
//!
//! Parses the `Authorization: Bearer <token>` header, validates the JWT
//! and loads the current user record through [`UserLookup`]. Handlers
//! that take an [`AuthenticatedUser`] parameter are therefore protected:
//! extraction failure answers 401/403 before the handler body runs.

use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::error::AuthError;
use crate::jwt::validate_token;
use crate::repo::UserLookup;
use atrium_commons::User;

/// The fully-loaded acting user for the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_user(self) -> User {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?;

    let value = header
        .to_str()
        .map_err(|_| AuthError::MalformedAuthorization("non-ASCII header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::MalformedAuthorization("expected Bearer scheme".to_string()))?;

    if token.is_empty() {
        return Err(AuthError::MalformedAuthorization("empty token".to_string()));
    }

    Ok(token.to_string())
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = bearer_token(&req)?;
            let claims = validate_token(&token)?;

            let lookup = req
                .app_data::<web::Data<Arc<dyn UserLookup>>>()
                .ok_or_else(|| AuthError::StoreError("user lookup not configured".to_string()))?;

            let user = lookup.get_user_by_id(&claims.user_id()).await?;
            if !user.is_enabled() {
                return Err(AuthError::UserDisabled);
            }

            Ok(AuthenticatedUser(user))
        })
    }
}
