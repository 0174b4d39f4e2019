//! Configuration traits for authentication.
//!
//! # Spring Equivalent
//! `AuthenticationProvider`

use actix_web::dev::ServiceRequest;

use crate::http::security::principal::Principal;

/// Supplies the [`Principal`] of a request.
///
/// How credentials are checked (sessions, tokens, an upstream proxy) is up
/// to the implementation; the gate only consumes the result. Requests that
/// carry no valid credentials yield [`Principal::anonymous`].
///
/// Closures `Fn(&ServiceRequest) -> Principal` implement this trait.
pub trait Authenticator {
    fn authenticate(&self, req: &ServiceRequest) -> Principal;
}

impl<F> Authenticator for F
where
    F: Fn(&ServiceRequest) -> Principal,
{
    fn authenticate(&self, req: &ServiceRequest) -> Principal {
        self(req)
    }
}
