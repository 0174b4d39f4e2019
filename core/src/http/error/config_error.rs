//! Errors raised while loading the rule table.
//!
//! Every variant is fatal: a gate that fails to load must not serve traffic.

use derive_more::{Display, Error, From};

#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    #[display("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        #[error(not(source))]
        pattern: String,
        reason: &'static str,
    },
    #[display("invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
    #[display("rule `{pattern}` is declared more than once")]
    DuplicateRule {
        #[error(not(source))]
        pattern: String,
    },
    #[display("rule `{pattern}` can never match, `{catch_all}` is declared before it")]
    UnreachableRule {
        #[error(not(source))]
        pattern: String,
        catch_all: String,
    },
    #[display("invalid role `{role}`: {reason}")]
    InvalidRole {
        #[error(not(source))]
        role: String,
        reason: &'static str,
    },
    #[display("rule `{pattern}` requires a role but lists none")]
    EmptyRoleSet {
        #[error(not(source))]
        pattern: String,
    },
    #[display("cannot read gate settings: {_0}")]
    #[from]
    Io(std::io::Error),
    #[display("malformed gate settings: {_0}")]
    #[from]
    Json(serde_json::Error),
}
