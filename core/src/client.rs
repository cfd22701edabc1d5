//! Stateless HTTP request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The round trip itself belongs to a `Transport`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Employee, EmployeeId, EmployeeRecord};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/employees";

const FETCH_ALL_FAILED: &str = "Failed to fetch employees";
const FETCH_ONE_FAILED: &str = "Failed to fetch employee";
const ADD_FAILED: &str = "Failed to add employee";
const UPDATE_FAILED: &str = "Failed to update employee";
const DELETE_FAILED: &str = "Failed to delete employee";
const BATCH_DELETE_FAILED: &str = "Failed to batch delete";

/// Synchronous, stateless client for the employee API.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base_url: String,
}

impl Default for EmployeeClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl EmployeeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_all(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, self.base_url.clone())
    }

    pub fn build_get(&self, id: EmployeeId) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/{id}", self.base_url))
    }

    pub fn build_create(&self, record: &EmployeeRecord) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, format!("{}/register", self.base_url), record)
    }

    pub fn build_update(&self, id: EmployeeId, record: &EmployeeRecord) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, format!("{}/{id}", self.base_url), record)
    }

    pub fn build_delete_one(&self, id: EmployeeId) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("{}/{id}", self.base_url))
    }

    pub fn build_delete_many(&self, ids: &[EmployeeId]) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, format!("{}/batch/delete", self.base_url), ids)
    }

    pub fn parse_list_all(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        check_status(&response, FETCH_ALL_FAILED)?;
        decode(&response.body)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, FETCH_ONE_FAILED)?;
        decode(&response.body)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, ADD_FAILED)?;
        decode(&response.body)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, UPDATE_FAILED)?;
        decode(&response.body)
    }

    pub fn parse_delete_one(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, DELETE_FAILED)
    }

    pub fn parse_delete_many(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, BATCH_DELETE_FAILED)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: String,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map any non-2xx status to `ApiError::Server`.
fn check_status(response: &HttpResponse, fallback: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_response(response.status, &response.body, fallback))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
