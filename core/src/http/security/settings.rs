//! Declarative gate settings, loaded once at startup.
//!
//! # Format
//! ```json
//! {
//!   "login_page": "/login",
//!   "rules": [
//!     { "pattern": "/register", "access": "permit_all" },
//!     { "pattern": "/welcome", "access": { "any_role": ["USER", "ADMIN"] } },
//!     { "pattern": "/admin/.*", "kind": "regex", "access": { "any_role": ["ADMIN"] } },
//!     { "pattern": "/account/**", "access": "authenticated" }
//!   ]
//! }
//! ```
//!
//! Rules keep their declaration order. Any error while reading or building
//! the settings is a [`ConfigError`] and the gate must not be started.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::http::error::ConfigError;
use crate::http::security::form_login::FormLoginConfig;
use crate::http::security::gate::AuthorizationGate;
use crate::http::security::rule::{RequestMatcher, Rule};

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateSettings {
    pub login_page: String,
    pub failure_url: Option<String>,
    pub logout_url: String,
    pub logout_success_url: Option<String>,
    /// Applies to ant patterns only.
    pub case_sensitive: bool,
    pub rules: Vec<RuleDefinition>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    pub pattern: String,
    #[serde(default)]
    pub kind: PatternKind,
    pub access: AccessDefinition,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    #[default]
    Ant,
    Regex,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDefinition {
    PermitAll,
    Authenticated,
    AnyRole(Vec<String>),
}

impl Default for GateSettings {
    fn default() -> Self {
        GateSettings {
            login_page: "/login".to_string(),
            failure_url: None,
            logout_url: "/logout".to_string(),
            logout_success_url: None,
            case_sensitive: true,
            rules: Vec::new(),
        }
    }
}

impl GateSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading gate settings from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn form_login(&self) -> FormLoginConfig {
        let mut form_login = FormLoginConfig::new()
            .login_page(&self.login_page)
            .logout_url(&self.logout_url);
        if let Some(url) = &self.failure_url {
            form_login = form_login.failure_url(url);
        }
        if let Some(url) = &self.logout_success_url {
            form_login = form_login.logout_success_url(url);
        }
        form_login
    }

    /// Validates every rule and freezes the table into a gate.
    pub fn build(&self) -> Result<AuthorizationGate, ConfigError> {
        let rules = self
            .rules
            .iter()
            .map(|definition| definition.to_rule(self.case_sensitive))
            .collect::<Result<Vec<_>, _>>()?;
        AuthorizationGate::with_form_login(self.form_login(), rules)
    }
}

impl RuleDefinition {
    pub fn to_rule(&self, case_sensitive: bool) -> Result<Rule, ConfigError> {
        let matcher = match self.kind {
            PatternKind::Ant => match RequestMatcher::ant(&self.pattern)? {
                RequestMatcher::Ant(ant) if !case_sensitive => {
                    RequestMatcher::Ant(ant.case_insensitive())
                }
                matcher => matcher,
            },
            PatternKind::Regex => RequestMatcher::regex(&self.pattern)?,
        };

        match &self.access {
            AccessDefinition::PermitAll => Ok(Rule::permit_all(matcher)),
            AccessDefinition::Authenticated => Ok(Rule::authenticated(matcher)),
            AccessDefinition::AnyRole(roles) => {
                let roles: Vec<&str> = roles.iter().map(String::as_str).collect();
                Rule::any_role(matcher, &roles)
            }
        }
    }
}
