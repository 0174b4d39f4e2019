//! Employee routes, guarded by role rules.

use std::sync::Mutex;

use actix_web::error::ErrorInternalServerError;
use actix_web::{get, post, web, Error, HttpRequest, HttpResponse, Responder};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use actix_gate_core::http::security::{AuthenticatedPrincipal, SecurityExt};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub department: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
}

lazy_static! {
    static ref EMPLOYEES: Mutex<Vec<Employee>> = Mutex::new(vec![Employee {
        id: 1,
        name: "Ada".to_string(),
        department: "Engineering".to_string(),
    }]);
}

/// USER or ADMIN.
#[get("/welcome")]
pub async fn welcome(req: HttpRequest, principal: AuthenticatedPrincipal) -> impl Responder {
    let mut body = format!("Welcome, {}!", principal.name());
    if req.has_role("ADMIN") {
        body.push_str("\nYou can add employees at /addNewEmployee.");
    }
    HttpResponse::Ok().body(body)
}

/// USER or ADMIN.
#[get("/getEmployees")]
pub async fn get_employees() -> Result<HttpResponse, Error> {
    let employees = EMPLOYEES
        .lock()
        .map_err(|_| ErrorInternalServerError("employee store unavailable"))?;
    Ok(HttpResponse::Ok().json(&*employees))
}

/// ADMIN only.
#[post("/addNewEmployee")]
pub async fn add_new_employee(
    principal: AuthenticatedPrincipal,
    form: web::Json<NewEmployee>,
) -> Result<HttpResponse, Error> {
    let mut employees = EMPLOYEES
        .lock()
        .map_err(|_| ErrorInternalServerError("employee store unavailable"))?;

    let NewEmployee { name, department } = form.into_inner();
    let id = employees.iter().map(|e| e.id).max().unwrap_or(0) + 1;
    let employee = Employee {
        id,
        name,
        department,
    };
    log::info!("{} added employee #{}", principal.name(), id);
    employees.push(employee.clone());

    Ok(HttpResponse::Created().json(employee))
}
