//! The authorization gate.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.web.access.intercept.RequestMatcherDelegatingAuthorizationManager`
//!
//! The gate owns an ordered rule table that is validated once and never
//! mutated afterwards. [`AuthorizationGate::authorize`] is a pure function
//! of the path and the principal, so a single gate can be shared behind an
//! `Arc` by every worker without locking.

use crate::http::error::ConfigError;
use crate::http::security::form_login::FormLoginConfig;
use crate::http::security::principal::Principal;
use crate::http::security::rule::{RequestMatcher, Rule};

/// Outcome of [`AuthorizationGate::authorize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Forward the request to its handler.
    Allow,
    /// Reject the request (`403 Forbidden`).
    Deny,
    /// Send the caller to the login page (`302 Found`).
    RedirectLogin,
}

/// Ordered, immutable rule table.
///
/// # Example
/// ```
/// use actix_gate_core::http::security::{
///     AuthorizationGate, Decision, Principal, RequestMatcher, Rule,
/// };
///
/// let gate = AuthorizationGate::new(vec![
///     Rule::permit_all(RequestMatcher::ant("/register").unwrap()),
///     Rule::any_role(RequestMatcher::ant("/welcome").unwrap(), &["USER", "ADMIN"]).unwrap(),
/// ])
/// .unwrap();
///
/// assert_eq!(gate.authorize("/welcome", &Principal::anonymous()), Decision::RedirectLogin);
/// assert_eq!(
///     gate.authorize("/welcome", &Principal::authenticated("bob", ["USER"])),
///     Decision::Allow
/// );
/// ```
#[derive(Clone, Debug)]
pub struct AuthorizationGate {
    rules: Vec<Rule>,
    fallback: Rule,
    form_login: FormLoginConfig,
}

impl AuthorizationGate {
    /// Builds a gate with the default form login endpoints (`/login`, `/logout`).
    pub fn new(rules: Vec<Rule>) -> Result<Self, ConfigError> {
        Self::with_form_login(FormLoginConfig::default(), rules)
    }

    /// Builds a gate from declared rules.
    ///
    /// The form login endpoints are placed ahead of `rules` as `PermitAll`
    /// entries and validated together with them. Paths matched by no rule
    /// require authentication.
    ///
    /// # Errors
    /// - [`ConfigError::DuplicateRule`] when a pattern is declared twice,
    ///   including a declared rule for a form login endpoint
    /// - [`ConfigError::UnreachableRule`] when a rule follows a catch-all
    /// - [`ConfigError::InvalidPattern`] for a malformed or non-literal form
    ///   login URL
    pub fn with_form_login(
        form_login: FormLoginConfig,
        rules: Vec<Rule>,
    ) -> Result<Self, ConfigError> {
        let mut table = form_login.permit_rules()?;
        table.extend(rules);
        validate(&table)?;

        let fallback = Rule::authenticated(RequestMatcher::ant("/**")?);

        log::info!(
            "Authorization gate loaded with {} rules (login page: {})",
            table.len(),
            form_login.get_login_page()
        );

        Ok(AuthorizationGate {
            rules: table,
            fallback,
            form_login,
        })
    }

    /// Decides whether `principal` may reach `path`.
    ///
    /// The first rule matching `path` decides. Without a match, any
    /// authenticated principal is allowed and anonymous callers are sent
    /// to the login page.
    pub fn authorize(&self, path: &str, principal: &Principal) -> Decision {
        let rule = self.matching_rule(path).unwrap_or(&self.fallback);
        let decision = rule.decide(principal);
        log::debug!(
            "{} -> {:?} for {} (rule {})",
            path,
            decision,
            principal.name(),
            rule.pattern()
        );
        decision
    }

    /// The first declared rule matching `path`, if any.
    pub fn matching_rule(&self, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// The full table, form login entries first.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn login_page(&self) -> &str {
        self.form_login.get_login_page()
    }

    pub fn form_login(&self) -> &FormLoginConfig {
        &self.form_login
    }
}

fn validate(rules: &[Rule]) -> Result<(), ConfigError> {
    for (index, rule) in rules.iter().enumerate() {
        let earlier = &rules[..index];

        if earlier
            .iter()
            .any(|prev| prev.matcher().same_as(rule.matcher()))
        {
            return Err(ConfigError::DuplicateRule {
                pattern: rule.pattern().to_string(),
            });
        }

        if let Some(catch_all) = earlier.iter().find(|prev| prev.matcher().is_catch_all()) {
            return Err(ConfigError::UnreachableRule {
                pattern: rule.pattern().to_string(),
                catch_all: catch_all.pattern().to_string(),
            });
        }
    }
    Ok(())
}
