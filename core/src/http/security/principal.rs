//! Identity attached to a request.
//!
//! # Spring Equivalent
//! `Authentication` / `AnonymousAuthenticationToken`

use std::collections::BTreeSet;
use std::fmt;

use crate::http::security::rule::{Role, ROLE_PREFIX};

/// Name given to unauthenticated principals.
pub const ANONYMOUS_NAME: &str = "anonymousUser";

/// The caller of a request and the roles granted to it.
///
/// An anonymous principal never carries roles.
///
/// # Example
/// ```
/// use actix_gate_core::http::security::Principal;
///
/// let admin = Principal::authenticated("alice", ["ROLE_ADMIN", "USER"]);
/// assert!(admin.is_authenticated());
/// assert!(admin.has_role("ADMIN"));
/// assert!(admin.has_role("ROLE_USER"));
///
/// assert!(!Principal::anonymous().is_authenticated());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    name: String,
    authenticated: bool,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Principal {
            name: ANONYMOUS_NAME.to_string(),
            authenticated: false,
            roles: BTreeSet::new(),
        }
    }

    /// Creates an authenticated principal.
    ///
    /// Authorities are turned into roles with [`Role::from_authority`];
    /// blank entries are skipped.
    pub fn authenticated<I, S>(name: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles = authorities
            .into_iter()
            .filter(|a| !a.as_ref().trim().is_empty())
            .map(|a| Role::from_authority(a.as_ref()))
            .collect();
        Principal {
            name: name.into(),
            authenticated: true,
            roles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Checks a single role; a `ROLE_` prefix on `role` is ignored.
    pub fn has_role(&self, role: &str) -> bool {
        let role = role.strip_prefix(ROLE_PREFIX).unwrap_or(role);
        self.roles.iter().any(|r| r.as_str() == role)
    }

    /// True when at least one of `roles` is held (OR logic).
    pub fn has_any_role(&self, roles: &BTreeSet<Role>) -> bool {
        !self.roles.is_disjoint(roles)
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<&str> = self.roles.iter().map(Role::as_str).collect();
        write!(
            f,
            "Principal {{ name: {}, authenticated: {}, roles: {:?} }}",
            self.name, self.authenticated, roles
        )
    }
}
