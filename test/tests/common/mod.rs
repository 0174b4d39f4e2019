//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - The employee directory rule table
//! - Test app builder
//! - Helper functions

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{get, post, test, App, HttpResponse, Responder};

use actix_gate_core::http::security::{
    AuthenticatedPrincipal, AuthorizationGate, CurrentPrincipal, GateSettings, GateTransform,
    HeaderAuthenticator, Principal,
};

// =============================================================================
// Test Configuration
// =============================================================================

/// Rule table of the employee directory:
/// - /register: permit all
/// - /welcome, /getEmployees: USER or ADMIN
/// - /addNewEmployee: ADMIN
/// - /login, /logout: permit all (form login)
/// - anything else: authenticated
pub const EMPLOYEE_SETTINGS: &str = include_str!("../../gate.json");

pub fn employee_gate() -> AuthorizationGate {
    GateSettings::from_json_str(EMPLOYEE_SETTINGS)
        .and_then(|settings| settings.build())
        .expect("bundled settings are valid")
}

pub fn anonymous() -> Principal {
    Principal::anonymous()
}

pub fn principal(name: &str, roles: &[&str]) -> Principal {
    Principal::authenticated(name, roles.iter().copied())
}

/// Adds the identity headers read by `HeaderAuthenticator`.
pub fn as_user(req: test::TestRequest, name: &str, roles: &[&str]) -> test::TestRequest {
    req.insert_header(("X-Auth-User", name))
        .insert_header(("X-Auth-Roles", roles.join(",")))
}

// =============================================================================
// Test Handlers
// =============================================================================

#[get("/register")]
pub async fn register() -> impl Responder {
    HttpResponse::Ok().body("Register")
}

#[get("/login")]
pub async fn login(principal: CurrentPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Login page for {}", principal.name()))
}

#[post("/logout")]
pub async fn logout() -> impl Responder {
    HttpResponse::Ok().body("Logged out")
}

#[get("/welcome")]
pub async fn welcome(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Welcome, {}!", principal.name()))
}

#[get("/getEmployees")]
pub async fn get_employees() -> impl Responder {
    HttpResponse::Ok().body("[]")
}

#[post("/addNewEmployee")]
pub async fn add_new_employee(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Created().body(format!("Added by {}", principal.name()))
}

#[get("/anything-else")]
pub async fn anything_else(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Anything for {}", principal.name()))
}

// =============================================================================
// Test App
// =============================================================================

pub async fn create_test_app() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let gate = Arc::new(employee_gate());

    test::init_service(
        App::new().service(
            actix_web::web::scope("")
                .wrap(GateTransform::new(gate).authenticator(HeaderAuthenticator::new()))
                .service(register)
                .service(login)
                .service(logout)
                .service(welcome)
                .service(get_employees)
                .service(add_new_employee)
                .service(anything_else),
        ),
    )
    .await
}
