//! Gate middleware for Actix Web.
//!
//! # Spring Equivalent
//! `SecurityFilterChain` / `AuthorizationFilter`

use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{http, Error, HttpMessage, HttpResponse, ResponseError};
use futures::future::{ok, ready, LocalBoxFuture, Ready};

use crate::http::error::AccessError;
use crate::http::security::authenticator::AnonymousAuthenticator;
use crate::http::security::config::Authenticator;
use crate::http::security::gate::{AuthorizationGate, Decision};

/// Middleware factory applying an [`AuthorizationGate`].
///
/// For every request the authenticator supplies a principal, which is
/// stored in the request extensions, and the gate's decision is applied:
///
/// | Decision        | Response                                 |
/// |-----------------|------------------------------------------|
/// | `Allow`         | forwarded to the wrapped service         |
/// | `Deny`          | `403 Forbidden`                          |
/// | `RedirectLogin` | `302 Found`, `Location: <login page>`    |
///
/// # Example
/// ```ignore
/// let gate = Arc::new(GateSettings::from_path("gate.json")?.build()?);
///
/// HttpServer::new(move || {
///     App::new().wrap(
///         GateTransform::new(Arc::clone(&gate)).authenticator(HeaderAuthenticator::new()),
///     )
/// })
/// ```
pub struct GateTransform<Auth = AnonymousAuthenticator> {
    gate: Arc<AuthorizationGate>,
    authenticator: Arc<Auth>,
}

impl GateTransform<AnonymousAuthenticator> {
    pub fn new(gate: Arc<AuthorizationGate>) -> Self {
        GateTransform {
            gate,
            authenticator: Arc::new(AnonymousAuthenticator),
        }
    }
}

impl<Auth> GateTransform<Auth> {
    /// Replaces the authenticator.
    pub fn authenticator<A: Authenticator>(self, authenticator: A) -> GateTransform<A> {
        GateTransform {
            gate: self.gate,
            authenticator: Arc::new(authenticator),
        }
    }
}

impl<S, B, Auth> Transform<S, ServiceRequest> for GateTransform<Auth>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = GateService<Auth, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(GateService {
            gate: Arc::clone(&self.gate),
            authenticator: Arc::clone(&self.authenticator),
            service,
        })
    }
}

/// Gate middleware service.
pub struct GateService<Auth, S> {
    gate: Arc<AuthorizationGate>,
    authenticator: Arc<Auth>,
    service: S,
}

impl<Auth, S, B> Service<ServiceRequest> for GateService<Auth, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = self.authenticator.authenticate(&req);
        // The router matches on the percent-decoded path, so the gate must too.
        let path = req.match_info().as_str().to_owned();
        let decision = self.gate.authorize(&path, &principal);

        match decision {
            Decision::Allow => {
                req.extensions_mut().insert(principal);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Decision::Deny => {
                log::warn!("Access denied to {} for {}", path, principal.name());
                let res = AccessError::Forbidden.error_response();
                Box::pin(ready(Ok(req.into_response(res.map_into_right_body()))))
            }
            Decision::RedirectLogin => {
                let res = HttpResponse::Found()
                    .append_header((http::header::LOCATION, self.gate.login_page()))
                    .finish();
                Box::pin(ready(Ok(req.into_response(res.map_into_right_body()))))
            }
        }
    }
}
