//! Anti-forgery check for state-changing requests
//!
//! Must be wrapped *inside* [`SessionAuthMiddleware`](crate::SessionAuthMiddleware)
//! (i.e. registered with `.wrap()` before it) so the identity is already
//! resolved when the check runs.
//!
//! - Safe methods (GET, HEAD, OPTIONS) pass through.
//! - Anonymous requests pass through; the handler answers them with 401.
//! - Identified POST/PUT/PATCH/DELETE requests need an `X-CSRF-Token` header
//!   matching the token derived for that identity, otherwise 403.

use crate::session_auth::UserId;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error, HttpMessage, HttpResponse,
};
use crypto_core::CsrfSecret;
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Header the client echoes the page-embedded token in
pub const CSRF_HEADER: &str = "X-CSRF-Token";

pub struct CsrfProtection {
    secret: Arc<CsrfSecret>,
}

impl CsrfProtection {
    pub fn new(secret: Arc<CsrfSecret>) -> Self {
        Self { secret }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CsrfProtection
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CsrfProtectionService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CsrfProtectionService {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct CsrfProtectionService<S> {
    service: Rc<S>,
    secret: Arc<CsrfSecret>,
}

impl<S, B> Service<ServiceRequest> for CsrfProtectionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let secret = self.secret.clone();

        Box::pin(async move {
            let identity = req.extensions().get::<UserId>().copied();

            if let Some(UserId(user_id)) = identity.filter(|_| is_state_changing(req.method())) {
                let presented = req
                    .headers()
                    .get(CSRF_HEADER)
                    .and_then(|h| h.to_str().ok())
                    .unwrap_or_default();

                if !secret.verify(user_id, presented) {
                    tracing::warn!(
                        user_id = user_id,
                        method = %req.method(),
                        path = %req.path(),
                        "Rejected request with missing or invalid CSRF token"
                    );
                    let res = HttpResponse::Forbidden().json(serde_json::json!({
                        "error": "Invalid authenticity token",
                        "status": 403,
                    }));
                    return Ok(req.into_response(res).map_into_right_body());
                }
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn is_state_changing(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
