//! Per-request session context resolved from the bearer token.
//!
//! Replaces any notion of shared mutable "current user" state: each request
//! resolves its own identity once, from the `Authorization` header, and the
//! result travels with the request. No endpoint in the public surface
//! requires authentication, so an absent or invalid token simply leaves the
//! request anonymous.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::Error;
use crate::domain::auth::{AuthTokens, TokenClaims};

const BEARER_PREFIX: &str = "Bearer ";

/// Identity attached to the current request, if any.
#[derive(Clone)]
pub struct SessionContext {
    claims: Option<TokenClaims>,
}

impl SessionContext {
    /// An anonymous context.
    pub const fn anonymous() -> Self {
        Self { claims: None }
    }

    fn authenticated(claims: TokenClaims) -> Self {
        Self {
            claims: Some(claims),
        }
    }

    /// The verified token claims, when a valid bearer token was sent.
    pub const fn subject(&self) -> Option<&TokenClaims> {
        self.claims.as_ref()
    }

    /// Require a verified subject or fail with `401 Unauthorized`.
    pub fn require_subject(&self) -> Result<&TokenClaims, Error> {
        self.subject()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

fn resolve(req: &HttpRequest) -> SessionContext {
    let Some(tokens) = req.app_data::<web::Data<AuthTokens>>() else {
        return SessionContext::anonymous();
    };
    let Some(raw) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
    else {
        return SessionContext::anonymous();
    };

    match tokens.verify(raw) {
        Ok(claims) => SessionContext::authenticated(claims),
        Err(err) => {
            debug!(error = %err, "bearer token rejected, continuing anonymously");
            SessionContext::anonymous()
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(resolve(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test};
    use uuid::Uuid;

    fn token_data() -> web::Data<AuthTokens> {
        web::Data::new(AuthTokens::new("test-secret"))
    }

    async fn subject_email(req: test::TestRequest, tokens: web::Data<AuthTokens>) -> String {
        let app = test::init_service(App::new().app_data(tokens).route(
            "/whoami",
            web::get().to(|session: SessionContext| async move {
                let body = session
                    .subject()
                    .map_or_else(|| "anonymous".to_owned(), |claims| claims.email.clone());
                HttpResponse::Ok().body(body)
            }),
        ))
        .await;
        let res = test::call_service(&app, req.uri("/whoami").to_request()).await;
        let body = test::read_body(res).await;
        String::from_utf8(body.to_vec()).expect("utf8 body")
    }

    #[actix_web::test]
    async fn valid_bearer_token_resolves_claims() {
        let tokens = token_data();
        let token = tokens
            .issue(Uuid::new_v4(), "ada@example.com")
            .expect("issue token");
        let req = test::TestRequest::get()
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
        assert_eq!(subject_email(req, tokens).await, "ada@example.com");
    }

    #[actix_web::test]
    async fn missing_header_is_anonymous() {
        assert_eq!(
            subject_email(test::TestRequest::get(), token_data()).await,
            "anonymous"
        );
    }

    #[actix_web::test]
    async fn tampered_token_is_anonymous() {
        let other = AuthTokens::new("different-secret");
        let token = other
            .issue(Uuid::new_v4(), "mallory@example.com")
            .expect("issue token");
        let req = test::TestRequest::get()
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
        assert_eq!(subject_email(req, token_data()).await, "anonymous");
    }

    #[actix_web::test]
    async fn non_bearer_scheme_is_anonymous() {
        let req = test::TestRequest::get()
            .insert_header((header::AUTHORIZATION, "Basic QWxhZGRpbjpvcGVu"));
        assert_eq!(subject_email(req, token_data()).await, "anonymous");
    }

    #[::core::prelude::v1::test]
    fn require_subject_rejects_anonymous_contexts() {
        let err = SessionContext::anonymous()
            .require_subject()
            .expect_err("anonymous");
        assert_eq!(err.code, crate::domain::ErrorCode::Unauthorized);
    }
}
