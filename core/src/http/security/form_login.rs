//! Form login and logout endpoints.
//!
//! # Spring Security Equivalent
//! `formLogin().loginPage("/login").permitAll()` and `logout().permitAll()`
//!
//! Rendering the login page and checking credentials happen elsewhere; the
//! gate only needs to know where to send unauthenticated callers and which
//! endpoints everyone may reach.
//!
//! # Example
//! ```rust
//! use actix_gate_core::http::security::FormLoginConfig;
//!
//! let form_login = FormLoginConfig::new()
//!     .login_page("/signin")
//!     .logout_url("/signout");
//!
//! assert_eq!(form_login.get_login_page(), "/signin");
//! assert_eq!(form_login.permitted_paths(), vec!["/signin", "/signout"]);
//! ```

use crate::http::error::ConfigError;
use crate::http::security::ant_matcher::AntMatcher;
use crate::http::security::rule::{RequestMatcher, Rule};

/// Form login configuration.
#[derive(Clone, Debug)]
pub struct FormLoginConfig {
    /// URL of the login page; unauthenticated callers are redirected here
    login_page: String,
    /// URL after failed login, defaults to `<login_page>?error`
    failure_url: Option<String>,
    /// URL that performs the logout
    logout_url: String,
    /// URL after logout, defaults to `<login_page>?logout`
    logout_success_url: Option<String>,
}

impl Default for FormLoginConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FormLoginConfig {
    pub fn new() -> Self {
        Self {
            login_page: "/login".to_string(),
            failure_url: None,
            logout_url: "/logout".to_string(),
            logout_success_url: None,
        }
    }

    /// # Spring Equivalent
    /// `formLogin().loginPage("/login")`
    pub fn login_page(mut self, url: &str) -> Self {
        self.login_page = url.to_string();
        self
    }

    /// # Spring Equivalent
    /// `formLogin().failureUrl("/login?error")`
    pub fn failure_url(mut self, url: &str) -> Self {
        self.failure_url = Some(url.to_string());
        self
    }

    /// # Spring Equivalent
    /// `logout().logoutUrl("/logout")`
    pub fn logout_url(mut self, url: &str) -> Self {
        self.logout_url = url.to_string();
        self
    }

    /// # Spring Equivalent
    /// `logout().logoutSuccessUrl("/login?logout")`
    pub fn logout_success_url(mut self, url: &str) -> Self {
        self.logout_success_url = Some(url.to_string());
        self
    }

    pub fn get_login_page(&self) -> &str {
        &self.login_page
    }

    pub fn get_failure_url(&self) -> String {
        self.failure_url
            .clone()
            .unwrap_or_else(|| format!("{}?error", self.login_page))
    }

    pub fn get_logout_url(&self) -> &str {
        &self.logout_url
    }

    pub fn get_logout_success_url(&self) -> String {
        self.logout_success_url
            .clone()
            .unwrap_or_else(|| format!("{}?logout", self.login_page))
    }

    /// Paths (query strings removed) that every caller may reach.
    pub fn permitted_paths(&self) -> Vec<String> {
        let candidates = [
            self.login_page.clone(),
            self.get_failure_url(),
            self.logout_url.clone(),
            self.get_logout_success_url(),
        ];

        let mut paths: Vec<String> = Vec::new();
        for url in candidates {
            let path = strip_query(&url).to_string();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// `PermitAll` rules for [`permitted_paths`](Self::permitted_paths).
    pub(crate) fn permit_rules(&self) -> Result<Vec<Rule>, ConfigError> {
        self.permitted_paths()
            .iter()
            .map(|path| {
                let matcher = AntMatcher::parse(path)?;
                if !matcher.is_literal() {
                    return Err(ConfigError::InvalidPattern {
                        pattern: path.to_string(),
                        reason: "form login URLs must be literal paths",
                    });
                }
                Ok(Rule::permit_all(RequestMatcher::Ant(matcher)))
            })
            .collect()
    }
}

fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}
