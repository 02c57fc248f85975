use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpRequest,
};
use crypto_core::SessionKeys;
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "_blog_session";

/// Identity of the signed-in user, resolved from the session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

/// Session authentication middleware
///
/// Resolves the caller's identity from the `_blog_session` cookie or an
/// `Authorization: Bearer` header. It never rejects a request: a missing or
/// invalid token just leaves the identity unresolved, and handlers decide
/// how to answer anonymous callers.
pub struct SessionAuthMiddleware {
    keys: Arc<SessionKeys>,
}

impl SessionAuthMiddleware {
    pub fn new(keys: Arc<SessionKeys>) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddlewareService {
            service: Rc::new(service),
            keys: self.keys.clone(),
        }))
    }
}

pub struct SessionAuthMiddlewareService<S> {
    service: Rc<S>,
    keys: Arc<SessionKeys>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let keys = self.keys.clone();

        Box::pin(async move {
            if let Some(token) = session_token(req.request()) {
                match keys.user_id(&token) {
                    Ok(user_id) => {
                        req.extensions_mut().insert(UserId(user_id));
                    }
                    Err(e) => {
                        tracing::debug!(path = %req.path(), "Ignoring invalid session: {}", e);
                    }
                }
            }

            service.call(req).await
        })
    }
}

/// Session token from the cookie, falling back to a Bearer header
fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Identity resolved for this request, if any
pub fn current_identity(req: &HttpRequest) -> Option<UserId> {
    req.extensions().get::<UserId>().copied()
}

/// FromRequest implementation for UserId
///
/// Fails with 401 when no identity was resolved; take `Option<UserId>` in a
/// handler to receive `None` instead.
impl actix_web::FromRequest for UserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match current_identity(req) {
            Some(user_id) => ready(Ok(user_id)),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "User not authenticated",
            ))),
        }
    }
}
