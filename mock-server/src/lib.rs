use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const BASE_PATH: &str = "/api/employees";

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    JavaDev,
    SeniorDev,
    Admin,
}

/// Response body. Passwords are never echoed back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

/// Create and update body. Missing fields decode as empty and are caught by
/// validation, so they come back as field errors rather than a JSON error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeInput {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Option<Role>,
    pub password: Option<String>,
}

impl EmployeeInput {
    /// Field name to message, empty when the input is acceptable.
    pub fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        if self.first_name.trim().is_empty() {
            errors.insert("firstName".to_string(), "First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.insert("lastName".to_string(), "Last name is required".to_string());
        }
        if !is_well_formed_email(&self.email) {
            errors.insert("email".to_string(), "Email should be valid".to_string());
        }
        if self.role.is_none() {
            errors.insert("role".to_string(), "Role is required".to_string());
        }
        let password_ok = self
            .password
            .as_deref()
            .is_some_and(|p| p.chars().count() >= MIN_PASSWORD_LEN);
        if !password_ok {
            errors.insert(
                "password".to_string(),
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        errors
    }
}

fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

#[derive(Default)]
pub struct Store {
    employees: RwLock<BTreeMap<i64, Employee>>,
    next_id: AtomicI64,
}

impl Store {
    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

pub type Db = Arc<Store>;

/// Failures rendered the way the service's exception handler renders them.
#[derive(Debug)]
pub enum ServiceError {
    Validation(BTreeMap<String, String>),
    InvalidJson,
    NotFound(i64),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ServiceError::InvalidJson => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON format. Please check your request body." })),
            )
                .into_response(),
            ServiceError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Employee not found with id: {id}") })),
            )
                .into_response(),
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(_: JsonRejection) -> Self {
        ServiceError::InvalidJson
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(Store::default());
    Router::new()
        .route(BASE_PATH, get(list_employees))
        .route(&format!("{BASE_PATH}/register"), post(create_employee))
        .route(&format!("{BASE_PATH}/batch/delete"), post(delete_employees))
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_employees(State(db): State<Db>) -> Json<Vec<Employee>> {
    let employees = db.employees.read().await;
    Json(employees.values().cloned().collect())
}

async fn create_employee(
    State(db): State<Db>,
    input: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ServiceError> {
    let Json(input) = input?;
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }
    let employee = Employee {
        id: db.allocate_id(),
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        role: input.role.unwrap_or(Role::User),
    };
    db.employees.write().await.insert(employee.id, employee.clone());
    info!(id = employee.id, "employee registered");
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn get_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ServiceError> {
    let employees = db.employees.read().await;
    employees.get(&id).cloned().map(Json).ok_or(ServiceError::NotFound(id))
}

/// Replaces name, email and role. The password is validated but never
/// changed here.
async fn update_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
    input: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>, ServiceError> {
    let Json(input) = input?;
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }
    let mut employees = db.employees.write().await;
    let employee = employees.get_mut(&id).ok_or(ServiceError::NotFound(id))?;
    employee.first_name = input.first_name;
    employee.last_name = input.last_name;
    employee.email = input.email;
    if let Some(role) = input.role {
        employee.role = role;
    }
    info!(id, "employee updated");
    Ok(Json(employee.clone()))
}

async fn delete_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    let mut employees = db.employees.write().await;
    employees.remove(&id).ok_or(ServiceError::NotFound(id))?;
    info!(id, "employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Unknown ids in the batch are skipped.
async fn delete_employees(
    State(db): State<Db>,
    ids: Result<Json<Vec<i64>>, JsonRejection>,
) -> Result<StatusCode, ServiceError> {
    let Json(ids) = ids?;
    let mut employees = db.employees.write().await;
    let removed = ids.iter().filter(|id| employees.remove(*id).is_some()).count();
    info!(requested = ids.len(), removed, "employees batch deleted");
    Ok(StatusCode::NO_CONTENT)
}
