//! Bearer-token extractors used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! token parsing and identity verification here. The caller's identity always
//! comes from the verified token subject, never from the request body.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity proven by a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    /// The verified user id.
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

/// Caller identity when a token is supplied; anonymous otherwise.
///
/// A malformed or expired token is still rejected rather than silently
/// treated as anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalUser(pub Option<UserId>);

fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, Error> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid text"))?;
    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("expected a bearer token"))?;
    Ok(Some(token.to_owned()))
}

async fn verify(state: Option<web::Data<HttpState>>, token: String) -> Result<UserId, Error> {
    let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    state.identity.verify(&token).await.map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::unauthorized("invalid or expired token")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?.ok_or_else(|| Error::unauthorized("login required"))?;
            verify(state, token).await.map(Self)
        })
    }
}

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            match token? {
                Some(token) => verify(state, token).await.map(|id| Self(Some(id))),
                None => Ok(Self(None)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{IdentityError, MockIdentityVerifier};
    use crate::inbound::http::test_utils::state_with_identity;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    fn identity() -> MockIdentityVerifier {
        let mut identity = MockIdentityVerifier::new();
        identity.expect_verify().returning(|token| {
            if token == "good-token" {
                Ok(UserId::new("user_seeker").expect("valid id"))
            } else {
                Err(IdentityError::invalid_token("signature mismatch"))
            }
        });
        identity
    }

    async fn call(uri: &str, authorization: Option<&str>) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_identity(identity())))
                .route(
                    "/required",
                    web::get().to(|user: AuthenticatedUser| async move {
                        HttpResponse::Ok().body(user.id().to_string())
                    }),
                )
                .route(
                    "/optional",
                    web::get().to(|user: OptionalUser| async move {
                        let body = user
                            .0
                            .map_or_else(|| "anonymous".to_owned(), |id| id.to_string());
                        HttpResponse::Ok().body(body)
                    }),
                ),
        )
        .await;
        let mut request = test::TestRequest::get().uri(uri);
        if let Some(value) = authorization {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn valid_token_yields_subject() {
        let (status, body) = call("/required", Some("Bearer good-token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "user_seeker");
    }

    #[rstest]
    #[case::missing(None)]
    #[case::wrong_scheme(Some("Basic dXNlcjpwYXNz"))]
    #[case::empty(Some("Bearer   "))]
    #[case::bad_signature(Some("Bearer forged"))]
    #[actix_web::test]
    async fn required_identity_rejects_bad_credentials(#[case] authorization: Option<&str>) {
        let (status, _) = call("/required", authorization).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn optional_identity_allows_anonymous_callers() {
        let (status, body) = call("/optional", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn optional_identity_still_rejects_forged_tokens() {
        let (status, _) = call("/optional", Some("Bearer forged")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
