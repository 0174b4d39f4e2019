//! Middleware tests.
//!
//! Tests for how `GateTransform` turns decisions into HTTP responses.

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;

use common::{as_user, create_test_app};

// =============================================================================
// Public Route Tests
// =============================================================================

#[actix_web::test]
async fn test_register_without_credentials() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/register").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_login_page_sees_anonymous_principal() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/login").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("anonymousUser"));
}

#[actix_web::test]
async fn test_logout_without_credentials() {
    let app = create_test_app().await;

    let req = test::TestRequest::post().uri("/logout").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Redirect Tests
// =============================================================================

#[actix_web::test]
async fn test_welcome_without_credentials_redirects_to_login() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/welcome").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn test_unlisted_route_without_credentials_redirects_to_login() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/anything-else").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

// =============================================================================
// Role Tests
// =============================================================================

#[actix_web::test]
async fn test_welcome_with_user() {
    let app = create_test_app().await;

    let req = as_user(test::TestRequest::get().uri("/welcome"), "bob", &["USER"]).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Welcome, bob!"));
}

#[actix_web::test]
async fn test_get_employees_with_guest_forbidden() {
    let app = create_test_app().await;

    let req = as_user(
        test::TestRequest::get().uri("/getEmployees"),
        "guest",
        &["GUEST"],
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_add_employee_with_user_forbidden() {
    let app = create_test_app().await;

    let req = as_user(
        test::TestRequest::post().uri("/addNewEmployee"),
        "bob",
        &["USER"],
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_add_employee_with_admin() {
    let app = create_test_app().await;

    let req = as_user(
        test::TestRequest::post().uri("/addNewEmployee"),
        "alice",
        &["ROLE_ADMIN"],
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Added by alice"));
}

#[actix_web::test]
async fn test_unlisted_route_with_roleless_principal() {
    let app = create_test_app().await;

    let req = as_user(test::TestRequest::get().uri("/anything-else"), "nobody", &[])
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Encoded Path Tests
// =============================================================================

#[actix_web::test]
async fn test_percent_encoded_admin_route_with_user_forbidden() {
    let app = create_test_app().await;

    let req = as_user(
        test::TestRequest::post().uri("/addNew%45mployee"),
        "bob",
        &["USER"],
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_percent_encoded_admin_route_with_admin() {
    let app = create_test_app().await;

    let req = as_user(
        test::TestRequest::post().uri("/addNew%45mployee"),
        "alice",
        &["ADMIN"],
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_percent_encoded_role_route_without_credentials_redirects() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/%77elcome").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}
