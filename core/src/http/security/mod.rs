//! Request authorization.
//!
//! # Spring Equivalent
//! `org.springframework.security.web.access` package
//!
//! # Module Structure
//!
//! - `ant_matcher` - Ant-style URL pattern matching
//! - `rule` - Roles, request matchers and rule table entries
//! - `principal` - Identity attached to a request
//! - `gate` - The authorization gate and its decisions
//! - `form_login` - Login/logout endpoints permitted to everyone
//! - `settings` - JSON rule table loaded at startup
//! - `config` - Core traits (Authenticator)
//! - `authenticator` - Built-in authenticators
//! - `middleware` - Gate middleware (GateTransform)
//! - `extractor` - Actix Web extractors (CurrentPrincipal, AuthenticatedPrincipal)

// Re-exports for convenience
pub use ant_matcher::AntMatcher;
pub use authenticator::{AnonymousAuthenticator, HeaderAuthenticator};
pub use config::Authenticator;
pub use extractor::{AuthenticatedPrincipal, CurrentPrincipal, SecurityExt};
pub use form_login::FormLoginConfig;
pub use gate::{AuthorizationGate, Decision};
pub use middleware::GateTransform;
pub use principal::Principal;
pub use rule::{RequestMatcher, Role, Rule, RuleMode};
pub use settings::{AccessDefinition, GateSettings, PatternKind, RuleDefinition};

// Internal modules
mod config;
mod extractor;
mod principal;

// Public modules
pub mod ant_matcher;
pub mod authenticator;
pub mod form_login;
pub mod gate;
pub mod middleware;
pub mod rule;
pub mod settings;
