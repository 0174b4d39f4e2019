//! Built-in authenticators.
//!
//! # Spring Security Equivalent
//! `AnonymousAuthenticationFilter` and
//! `org.springframework.security.web.authentication.preauth.RequestHeaderAuthenticationFilter`

use actix_web::dev::ServiceRequest;

use crate::http::security::config::Authenticator;
use crate::http::security::principal::Principal;

/// Treats every caller as anonymous.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnonymousAuthenticator;

impl Authenticator for AnonymousAuthenticator {
    fn authenticate(&self, _req: &ServiceRequest) -> Principal {
        Principal::anonymous()
    }
}

/// Reads a pre-authenticated identity from request headers.
///
/// Meant to sit behind a proxy that has already authenticated the caller
/// and strips these headers from client traffic. Roles are a
/// comma-separated list; `ROLE_` prefixes are accepted.
///
/// # Example
/// ```ignore
/// let authenticator = HeaderAuthenticator::new()
///     .user_header("X-Forwarded-User")
///     .roles_header("X-Forwarded-Groups");
/// ```
#[derive(Clone, Debug)]
pub struct HeaderAuthenticator {
    user_header: String,
    roles_header: String,
}

impl HeaderAuthenticator {
    /// Uses `X-Auth-User` and `X-Auth-Roles`.
    pub fn new() -> Self {
        HeaderAuthenticator {
            user_header: "X-Auth-User".to_string(),
            roles_header: "X-Auth-Roles".to_string(),
        }
    }

    pub fn user_header(mut self, name: &str) -> Self {
        self.user_header = name.to_string();
        self
    }

    pub fn roles_header(mut self, name: &str) -> Self {
        self.roles_header = name.to_string();
        self
    }
}

impl Default for HeaderAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl Authenticator for HeaderAuthenticator {
    fn authenticate(&self, req: &ServiceRequest) -> Principal {
        let user = match header_value(req, &self.user_header).map(str::trim) {
            Some(user) if !user.is_empty() => user,
            _ => return Principal::anonymous(),
        };
        let roles = header_value(req, &self.roles_header).unwrap_or_default();
        Principal::authenticated(user, roles.split(','))
    }
}

fn header_value<'a>(req: &'a ServiceRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name)?.to_str().ok()
}
