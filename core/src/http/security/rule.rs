//! Entries of the authorization rule table.
//!
//! # Spring Security Equivalent
//! One `requestMatchers(...).permitAll()` / `.hasAnyRole(...)` entry of
//! `authorizeHttpRequests()`

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;

use crate::http::error::ConfigError;
use crate::http::security::ant_matcher::AntMatcher;
use crate::http::security::gate::Decision;
use crate::http::security::principal::Principal;

/// Prefix some authentication systems put in front of role names.
pub const ROLE_PREFIX: &str = "ROLE_";

/// A named permission group, such as `USER` or `ADMIN`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(String);

impl Role {
    /// Parses a role required by a rule.
    ///
    /// # Errors
    /// [`ConfigError::InvalidRole`] for a blank name or a name that already
    /// carries the `ROLE_` prefix.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidRole {
                role: name.to_string(),
                reason: "role name is empty",
            });
        }
        if trimmed.starts_with(ROLE_PREFIX) {
            return Err(ConfigError::InvalidRole {
                role: name.to_string(),
                reason: "role must not start with 'ROLE_', it is added automatically",
            });
        }
        Ok(Role(trimmed.to_string()))
    }

    /// Builds a role from an authority granted to a principal.
    ///
    /// A leading `ROLE_` is stripped, so `ROLE_ADMIN` and `ADMIN` are the
    /// same role.
    pub fn from_authority(authority: &str) -> Self {
        let trimmed = authority.trim();
        Role(trimmed.strip_prefix(ROLE_PREFIX).unwrap_or(trimmed).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a rule grants access once it governs a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleMode {
    /// Everyone, authenticated or not.
    PermitAll,
    /// Authenticated principals holding at least one of the required roles.
    /// An empty role set admits any authenticated principal.
    RequireAnyRole,
}

const REGEX_CATCH_ALLS: [&str; 6] = [".*", ".+", "/.*", "/?.*", "(.*)", "(/.*)?"];

/// Path matching strategy of a rule.
///
/// # Spring Security Equivalent
/// `AntPathRequestMatcher` / `RegexRequestMatcher`
#[derive(Clone, Debug)]
pub enum RequestMatcher {
    Ant(AntMatcher),
    Regex { pattern: String, regex: Regex },
}

impl RequestMatcher {
    /// Ant-style matcher, see [`AntMatcher`].
    pub fn ant(pattern: &str) -> Result<Self, ConfigError> {
        AntMatcher::parse(pattern).map(RequestMatcher::Ant)
    }

    /// Regex matcher. The expression must match the whole path.
    pub fn regex(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            ConfigError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(RequestMatcher::Regex {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RequestMatcher::Ant(ant) => ant.matches(path),
            RequestMatcher::Regex { regex, .. } => regex.is_match(path),
        }
    }

    /// The pattern as declared.
    pub fn pattern(&self) -> &str {
        match self {
            RequestMatcher::Ant(ant) => ant.pattern(),
            RequestMatcher::Regex { pattern, .. } => pattern,
        }
    }

    /// True when the matcher accepts every path, making later rules dead.
    ///
    /// Ant `/**` is a catch-all. For regexes only the usual spellings are
    /// recognised (`.*`, `.+`, `/.*`, `/?.*`, `(.*)`, `(/.*)?`, optionally
    /// wrapped in `^`/`$`), since equivalence of arbitrary expressions is
    /// not decidable here.
    pub fn is_catch_all(&self) -> bool {
        match self {
            RequestMatcher::Ant(ant) => ant.is_catch_all(),
            RequestMatcher::Regex { pattern, .. } => {
                let body = pattern.strip_prefix('^').unwrap_or(pattern);
                let body = body.strip_suffix('$').unwrap_or(body);
                REGEX_CATCH_ALLS.contains(&body)
            }
        }
    }

    /// Same kind and equivalent pattern.
    pub(crate) fn same_as(&self, other: &RequestMatcher) -> bool {
        match (self, other) {
            (RequestMatcher::Ant(a), RequestMatcher::Ant(b)) => a.same_pattern(b),
            (RequestMatcher::Regex { pattern: a, .. }, RequestMatcher::Regex { pattern: b, .. }) => {
                a == b
            }
            _ => false,
        }
    }
}

/// One entry of the rule table: a path matcher and the access it demands.
#[derive(Clone, Debug)]
pub struct Rule {
    matcher: RequestMatcher,
    required_roles: BTreeSet<Role>,
    mode: RuleMode,
}

impl Rule {
    /// # Spring Security Equivalent
    /// `.requestMatchers("/register").permitAll()`
    pub fn permit_all(matcher: RequestMatcher) -> Self {
        Rule {
            matcher,
            required_roles: BTreeSet::new(),
            mode: RuleMode::PermitAll,
        }
    }

    /// # Spring Security Equivalent
    /// `.requestMatchers("/welcome").hasAnyRole("USER", "ADMIN")`
    ///
    /// # Errors
    /// [`ConfigError::EmptyRoleSet`] when `roles` is empty, or
    /// [`ConfigError::InvalidRole`] for a malformed role name.
    pub fn any_role(matcher: RequestMatcher, roles: &[&str]) -> Result<Self, ConfigError> {
        if roles.is_empty() {
            return Err(ConfigError::EmptyRoleSet {
                pattern: matcher.pattern().to_string(),
            });
        }
        let required_roles = roles
            .iter()
            .map(|role| Role::parse(role))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Rule {
            matcher,
            required_roles,
            mode: RuleMode::RequireAnyRole,
        })
    }

    /// # Spring Security Equivalent
    /// `.requestMatchers(...).authenticated()`
    pub fn authenticated(matcher: RequestMatcher) -> Self {
        Rule {
            matcher,
            required_roles: BTreeSet::new(),
            mode: RuleMode::RequireAnyRole,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }

    pub fn mode(&self) -> RuleMode {
        self.mode
    }

    pub fn required_roles(&self) -> &BTreeSet<Role> {
        &self.required_roles
    }

    pub fn matcher(&self) -> &RequestMatcher {
        &self.matcher
    }

    /// Decides access for `principal`, assuming this rule governs the path.
    pub fn decide(&self, principal: &Principal) -> Decision {
        match self.mode {
            RuleMode::PermitAll => Decision::Allow,
            RuleMode::RequireAnyRole if !principal.is_authenticated() => Decision::RedirectLogin,
            RuleMode::RequireAnyRole => {
                if self.required_roles.is_empty() || principal.has_any_role(&self.required_roles) {
                    Decision::Allow
                } else {
                    Decision::Deny
                }
            }
        }
    }
}
