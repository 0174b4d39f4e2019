//! Extractors for accessing the request's principal in handlers.
//!
//! # Spring Equivalent
//! `@AuthenticationPrincipal` annotation / `SecurityContextHolder`
//!
//! The gate middleware stores a [`Principal`] in the request extensions
//! for every request it lets through.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AccessError;
use crate::http::security::Principal;

/// The principal of the request, anonymous when nobody is logged in.
///
/// Never fails.
///
/// # Usage
/// ```ignore
/// async fn handler(principal: CurrentPrincipal) -> impl Responder {
///     format!("Hello, {}!", principal.name())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(Principal);

impl CurrentPrincipal {
    pub fn into_inner(self) -> Principal {
        self.0
    }
}

impl Deref for CurrentPrincipal {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentPrincipal {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(CurrentPrincipal(req.principal())))
    }
}

/// An authenticated principal.
///
/// # Errors
/// Returns `401 Unauthorized` when the request is anonymous.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(Principal);

impl AuthenticatedPrincipal {
    pub fn into_inner(self) -> Principal {
        self.0
    }
}

impl Deref for AuthenticatedPrincipal {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedPrincipal {
    type Error = AccessError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req.principal();
        if principal.is_authenticated() {
            ready(Ok(AuthenticatedPrincipal(principal)))
        } else {
            ready(Err(AccessError::Unauthorized))
        }
    }
}

/// Extension trait for HttpRequest to inspect the principal.
pub trait SecurityExt {
    /// The stored principal, or an anonymous one.
    fn principal(&self) -> Principal;

    fn has_role(&self, role: &str) -> bool;
}

impl SecurityExt for HttpRequest {
    fn principal(&self) -> Principal {
        self.extensions()
            .get::<Principal>()
            .cloned()
            .unwrap_or_default()
    }

    fn has_role(&self, role: &str) -> bool {
        self.extensions()
            .get::<Principal>()
            .is_some_and(|p| p.has_role(role))
    }
}
