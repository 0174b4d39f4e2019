//! # Actix Gate
//!
//! Role-based request authorization for Actix Web.
//!
//! An [`AuthorizationGate`](http::security::AuthorizationGate) holds an
//! ordered, immutable table of path rules. For each request it returns
//! one of three decisions: allow, deny, or redirect to the login page.
//! [`GateTransform`](http::security::middleware::GateTransform) applies
//! those decisions in front of an Actix Web application.
//!
//! ```
//! use actix_gate_core::http::security::{
//!     AuthorizationGate, Decision, Principal, RequestMatcher, Rule,
//! };
//!
//! let gate = AuthorizationGate::new(vec![
//!     Rule::permit_all(RequestMatcher::ant("/register").unwrap()),
//!     Rule::any_role(RequestMatcher::ant("/addNewEmployee").unwrap(), &["ADMIN"]).unwrap(),
//! ])
//! .unwrap();
//!
//! let user = Principal::authenticated("alice", ["USER"]);
//! assert_eq!(gate.authorize("/register", &Principal::anonymous()), Decision::Allow);
//! assert_eq!(gate.authorize("/addNewEmployee", &user), Decision::Deny);
//! ```
//!
//! ## Modules
//!
//! - [`http::security`] - Rules, the gate, middleware and extractors
//! - [`http::error`] - Error types

pub mod http;
